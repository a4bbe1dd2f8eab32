//! Transaction Table
//!
//! Paging and filtering state for the transaction table, and the refresh
//! operation that turns a state into a rendered page.
//!
//! ## State flow
//!
//! ```text
//! TableState --query()--> DashboardSource --TransactionPage--> (TableState', TableView)
//! ```
//!
//! `TableState` is a plain value: the refresh operation takes it by value
//! and hands back the updated state. A failed refresh returns the state
//! unchanged and no view, so the table keeps showing its last page.

mod state;
mod view;

pub use state::{change_page, refresh_table, TableState};
pub use view::{PageButton, PaginationView, TableRow, TableView, MAX_PAGE_BUTTONS};
