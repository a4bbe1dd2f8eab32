//! Table state and refresh operation

use crate::client::DashboardSource;
use crate::transaction::{TransactionQuery, DEFAULT_PAGE_SIZE};

use super::view::TableView;

/// Paging and filter state of the transaction table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// 1-based page currently shown
    pub current_page: u32,
    /// Rows per page
    pub page_size: u32,
    /// Page count reported by the last successful refresh
    pub total_pages: u32,
    /// Free-text search
    pub search: String,
    /// Type filter, empty for all types
    pub type_filter: String,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 1,
            search: String::new(),
            type_filter: String::new(),
        }
    }
}

impl TableState {
    /// Initial state with a custom page size
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    /// The request this state corresponds to
    pub fn query(&self) -> TransactionQuery {
        TransactionQuery::new(self.current_page, self.page_size)
            .search(self.search.clone())
            .type_filter(self.type_filter.clone())
    }

    /// Select a page. `total_pages` only changes on refresh.
    pub fn with_page(self, page: u32) -> Self {
        Self {
            current_page: page,
            ..self
        }
    }

    /// Replace the filters and go back to the first page
    pub fn with_filters(self, search: impl Into<String>, type_filter: impl Into<String>) -> Self {
        Self {
            current_page: 1,
            search: search.into(),
            type_filter: type_filter.into(),
            ..self
        }
    }
}

/// Fetch the page described by `state` and render it.
///
/// On success the returned state carries the page count from the response.
/// On failure the error is logged and `state` comes back unchanged with no
/// view.
pub async fn refresh_table<S>(source: &S, state: TableState) -> (TableState, Option<TableView>)
where
    S: DashboardSource + ?Sized,
{
    let query = state.query();

    match source.fetch_transactions(&query).await {
        Ok(page) => {
            tracing::debug!(
                page = query.page,
                pages = page.pages,
                rows = page.transactions.len(),
                "Transaction table refreshed"
            );
            let state = TableState {
                total_pages: page.pages,
                ..state
            };
            let view = TableView::from_page(&page, &state);
            (state, Some(view))
        }
        Err(e) => {
            tracing::error!(error = %e, page = query.page, "Error updating transactions table");
            (state, None)
        }
    }
}

/// Select `page` and refresh the table for it
pub async fn change_page<S>(
    source: &S,
    state: TableState,
    page: u32,
) -> (TableState, Option<TableView>)
where
    S: DashboardSource + ?Sized,
{
    refresh_table(source, state.with_page(page)).await
}
