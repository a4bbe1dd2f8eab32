//! Rendered table page

use serde::Serialize;

use super::state::TableState;
use crate::format::{format_currency, format_date, type_label};
use crate::transaction::{Transaction, TransactionPage};
use crate::view::PLACEHOLDER;

/// One rendered page of the transaction table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub pagination: PaginationView,
    /// Number of transactions matching the filters
    pub total: usize,
}

/// A formatted table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub phone_number: String,
    pub reference_id: String,
    pub details: String,
}

/// Most numbered buttons shown at once
pub const MAX_PAGE_BUTTONS: u32 = 10;

/// First/last controls plus numbered buttons around the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    /// "«" jumps to page 1
    pub first_disabled: bool,
    /// "»" jumps to the last page
    pub last_disabled: bool,
    /// At most [`MAX_PAGE_BUTTONS`] consecutive pages, containing the current one
    pub buttons: Vec<PageButton>,
}

/// A numbered page button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub page: u32,
    pub active: bool,
}

impl TableRow {
    fn from_transaction(t: &Transaction) -> Self {
        Self {
            date: format_date(&t.date),
            kind: type_label(&t.kind),
            amount: format_currency(t.amount),
            phone_number: or_placeholder(t.phone_number.as_deref()),
            reference_id: or_placeholder(t.reference_id.as_deref()),
            details: t.details.clone(),
        }
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

impl PaginationView {
    /// Controls for `current_page` out of `total_pages`
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let visible = total_pages.min(MAX_PAGE_BUTTONS);
        let anchor = current_page.clamp(1, total_pages.max(1));
        let first = anchor
            .saturating_sub(visible / 2)
            .max(1)
            .min(total_pages.saturating_sub(visible) + 1);

        let buttons = if visible == 0 {
            Vec::new()
        } else {
            (first..=first + (visible - 1))
                .map(|page| PageButton {
                    page,
                    active: page == current_page,
                })
                .collect()
        };

        Self {
            current_page,
            total_pages,
            first_disabled: current_page <= 1,
            last_disabled: total_pages == 0 || current_page >= total_pages,
            buttons,
        }
    }
}

impl TableView {
    /// Render a fetched page for the state that requested it
    pub fn from_page(page: &TransactionPage, state: &TableState) -> Self {
        Self {
            rows: page.transactions.iter().map(TableRow::from_transaction).collect(),
            pagination: PaginationView::new(state.current_page, state.total_pages),
            total: page.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction() -> Transaction {
        Transaction {
            transaction_id: Some("76662021700".to_string()),
            date: "2024-05-10 16:30:51".to_string(),
            kind: "incoming_money".to_string(),
            amount: 2000.0,
            phone_number: Some("250795963036".to_string()),
            reference_id: None,
            details: "You have received 2000 RWF from Jane Smith".to_string(),
            balance: Some(2000.0),
            fee: None,
        }
    }

    #[test]
    fn test_row_formatting() {
        let row = TableRow::from_transaction(&transaction());
        assert_eq!(row.date, "May 10, 2024, 04:30 PM");
        assert_eq!(row.kind, "INCOMING MONEY");
        assert_eq!(row.amount, "RWF 2,000");
        assert_eq!(row.phone_number, "250795963036");
        assert_eq!(row.reference_id, PLACEHOLDER);
    }

    #[test]
    fn test_pagination_first_page() {
        let pagination = PaginationView::new(1, 3);
        assert!(pagination.first_disabled);
        assert!(!pagination.last_disabled);
        assert_eq!(pagination.buttons.len(), 3);
        assert!(pagination.buttons[0].active);
        assert!(!pagination.buttons[1].active);
    }

    #[test]
    fn test_pagination_last_page() {
        let pagination = PaginationView::new(3, 3);
        assert!(!pagination.first_disabled);
        assert!(pagination.last_disabled);
        assert!(pagination.buttons[2].active);
    }

    #[test]
    fn test_pagination_no_results() {
        let pagination = PaginationView::new(1, 0);
        assert!(pagination.buttons.is_empty());
        assert!(pagination.first_disabled);
        assert!(pagination.last_disabled);
    }

    #[test]
    fn test_pagination_window_is_bounded() {
        let pagination = PaginationView::new(5_000, u32::MAX);
        assert_eq!(pagination.buttons.len(), MAX_PAGE_BUTTONS as usize);
        assert!(pagination.buttons.iter().any(|b| b.active && b.page == 5_000));
        assert!(!pagination.last_disabled);

        let pagination = PaginationView::new(u32::MAX, u32::MAX);
        assert_eq!(pagination.buttons.len(), MAX_PAGE_BUTTONS as usize);
        assert_eq!(pagination.buttons.last().map(|b| b.page), Some(u32::MAX));
        assert!(pagination.last_disabled);
    }

    #[test]
    fn test_pagination_window_edges() {
        let pagination = PaginationView::new(2, 40);
        let pages: Vec<u32> = pagination.buttons.iter().map(|b| b.page).collect();
        assert_eq!(pages, (1..=10).collect::<Vec<_>>());

        let pagination = PaginationView::new(39, 40);
        assert_eq!(pagination.buttons[0].page, 31);
        assert_eq!(pagination.buttons[9].page, 40);
    }

    #[test]
    fn test_view_from_page() {
        let page = TransactionPage {
            transactions: vec![transaction()],
            total: 11,
            page: 2,
            pages: 2,
        };
        let state = TableState {
            current_page: 2,
            total_pages: 2,
            ..Default::default()
        };

        let view = TableView::from_page(&page, &state);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.total, 11);
        assert!(view.pagination.buttons[1].active);
    }
}
