//! HTTP data source
//!
//! Fetches the snapshot document and transaction pages from the dashboard
//! server with `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Response};

use super::{ClientError, DashboardSource};
use crate::config::DashboardConfig;
use crate::transaction::{TransactionPage, TransactionQuery};

/// [`DashboardSource`] backed by the dashboard HTTP server
pub struct HttpSource {
    client: Client,
    config: DashboardConfig,
}

impl HttpSource {
    /// Create a source for the given dashboard configuration
    pub fn new(config: DashboardConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Absolute URL of the snapshot document
    pub fn snapshot_url(&self) -> String {
        format!("{}{}", self.base_url(), self.config.snapshot_path)
    }

    /// Absolute URL of a transaction list request
    pub fn transactions_url(&self, query: &TransactionQuery) -> String {
        format!(
            "{}{}?{}",
            self.base_url(),
            self.config.transactions_path,
            query.to_query_string()
        )
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    async fn get(&self, url: &str) -> Result<Response, ClientError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl DashboardSource for HttpSource {
    async fn fetch_snapshot(&self) -> Result<String, ClientError> {
        let url = self.snapshot_url();
        tracing::debug!(url = %url, "Fetching snapshot document");

        let response = self.get(&url).await?;
        response.text().await.map_err(ClientError::from_transport)
    }

    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<TransactionPage, ClientError> {
        let url = self.transactions_url(query);
        tracing::debug!(url = %url, page = query.page, "Fetching transactions");

        let response = self.get(&url).await?;
        let body = response.text().await.map_err(ClientError::from_transport)?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
