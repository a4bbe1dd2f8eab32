//! Dashboard Data Sources
//!
//! The dashboard needs two independent fetches: the snapshot document and a
//! page of the transaction list. [`DashboardSource`] is the seam between the
//! controllers and the network; [`HttpSource`] is the production
//! implementation.
//!
//! Requests are single-shot: no retries, no cancellation and no
//! de-duplication of in-flight requests.

mod error;
mod http;

pub use error::ClientError;
pub use http::HttpSource;

use async_trait::async_trait;

use crate::transaction::{TransactionPage, TransactionQuery};

/// Provider of the snapshot document and transaction pages
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Fetch the raw snapshot XML
    async fn fetch_snapshot(&self) -> Result<String, ClientError>;

    /// Fetch one page of the transaction list
    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<TransactionPage, ClientError>;
}
