//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not shared
//! with the client. Transaction pages and snapshots are served as-is.

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ApiConfig;
use crate::transaction::TransactionQuery;

/// Query parameters of `GET /api/transactions`
#[derive(Debug, Default, Deserialize)]
pub struct TransactionParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub type_filter: Option<String>,
}

impl TransactionParams {
    /// Validate and fill in defaults
    pub fn into_query(self, config: &ApiConfig) -> ApiResult<TransactionQuery> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(ApiError::Validation("page must be at least 1".to_string()));
        }

        let limit = self.limit.unwrap_or(config.default_page_size);
        if limit == 0 || limit > config.max_page_size {
            return Err(ApiError::Validation(format!(
                "limit must be between 1 and {}",
                config.max_page_size
            )));
        }

        Ok(TransactionQuery::new(page, limit)
            .search(self.search.unwrap_or_default().trim())
            .type_filter(self.type_filter.unwrap_or_default().trim()))
    }
}

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or empty
    pub status: String,
    /// Number of transactions loaded
    pub transactions: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
