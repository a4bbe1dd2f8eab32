//! Dashboard Controller
//!
//! Loads the snapshot document and keeps the last successfully built view.
//! A failed load is logged and leaves the previous view in place.

use crate::client::DashboardSource;
use crate::snapshot::{parse_snapshot, AggregateSnapshot};
use crate::view::DashboardView;

/// Last-known dashboard contents
#[derive(Debug, Default)]
pub struct Dashboard {
    snapshot: Option<AggregateSnapshot>,
    view: Option<DashboardView>,
}

impl Dashboard {
    /// Empty dashboard, nothing loaded yet
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot behind the current view
    pub fn snapshot(&self) -> Option<&AggregateSnapshot> {
        self.snapshot.as_ref()
    }

    /// The current view
    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    /// Fetch, parse and build a new view. Returns whether the view changed.
    pub async fn load<S>(&mut self, source: &S) -> bool
    where
        S: DashboardSource + ?Sized,
    {
        let xml = match source.fetch_snapshot().await {
            Ok(xml) => xml,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching snapshot document");
                return false;
            }
        };

        let snapshot = match parse_snapshot(&xml) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "Error updating dashboard");
                return false;
            }
        };

        tracing::info!(
            total_transactions = snapshot.total_transactions,
            types = snapshot.by_type.len(),
            "Dashboard updated"
        );

        self.view = Some(DashboardView::build(&snapshot));
        self.snapshot = Some(snapshot);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::transaction::{TransactionPage, TransactionQuery};
    use async_trait::async_trait;

    struct StaticSource(Result<&'static str, ()>);

    #[async_trait]
    impl DashboardSource for StaticSource {
        async fn fetch_snapshot(&self) -> Result<String, ClientError> {
            self.0
                .map(str::to_string)
                .map_err(|_| ClientError::Unavailable)
        }

        async fn fetch_transactions(
            &self,
            _query: &TransactionQuery,
        ) -> Result<TransactionPage, ClientError> {
            Err(ClientError::Unavailable)
        }
    }

    const DOCUMENT: &str = r#"<summary>
        <total_transactions>2</total_transactions>
        <by_type><type name="payment"><count>2</count></type></by_type>
    </summary>"#;

    #[tokio::test]
    async fn test_load_builds_view() {
        let mut dashboard = Dashboard::new();
        assert!(dashboard.load(&StaticSource(Ok(DOCUMENT))).await);

        let view = dashboard.view().unwrap();
        assert_eq!(view.cards.total_transactions, "2");
        assert_eq!(view.cards.most_common_type, "PAYMENT");
        assert_eq!(dashboard.snapshot().unwrap().type_count("payment"), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_last_view() {
        let mut dashboard = Dashboard::new();
        dashboard.load(&StaticSource(Ok(DOCUMENT))).await;
        let before = dashboard.view().cloned();

        assert!(!dashboard.load(&StaticSource(Err(()))).await);
        assert_eq!(dashboard.view().cloned(), before);
    }

    #[tokio::test]
    async fn test_malformed_document_keeps_last_view() {
        let mut dashboard = Dashboard::new();
        assert!(!dashboard.load(&StaticSource(Ok("<summary><total"))).await);
        assert!(dashboard.view().is_none());
    }
}
