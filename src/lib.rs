//! # MoMo Dashboard
//!
//! Mobile-money analytics dashboard: turns MoMo SMS transaction exports into
//! summary cards, charts and a searchable, paginated transaction table.
//!
//! ## Features
//!
//! - **Snapshot parsing**: best-effort reading of the aggregate summary XML
//! - **View model**: cards, chart series and top-contact cards for rendering
//! - **Transaction table**: explicit paging and filter state with refresh
//! - **Ingest**: SMS classification, filtering and aggregation on the server
//! - **API**: Axum server for the transaction list and the snapshot
//!
//! ## Modules
//!
//! - [`snapshot`]: Snapshot document types, parser and writer
//! - [`view`]: Dashboard view model and terminal rendering
//! - [`table`]: Transaction table state and refresh
//! - [`client`]: Data sources for the dashboard
//! - [`ingest`]: Transaction loading, classification and aggregation
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use momo_dashboard::client::HttpSource;
//! use momo_dashboard::config::DashboardConfig;
//! use momo_dashboard::table::{refresh_table, TableState};
//! use momo_dashboard::Dashboard;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpSource::new(DashboardConfig::default())?;
//!
//!     // Cards and charts
//!     let mut dashboard = Dashboard::new();
//!     if dashboard.load(&source).await {
//!         if let Some(view) = dashboard.view() {
//!             println!("{}", momo_dashboard::view::render::render_dashboard(view));
//!         }
//!     }
//!
//!     // First page of the transaction table
//!     let (_state, table) = refresh_table(&source, TableState::default()).await;
//!     if let Some(table) = table {
//!         println!("{}", momo_dashboard::view::render::render_table(&table));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod snapshot;
pub mod table;
pub mod transaction;
pub mod view;

// Re-export top-level types for convenience
pub use snapshot::{
    parse_snapshot, write_snapshot, AggregateSnapshot, MonthlyTotal, SnapshotError,
    SnapshotResult, TopContact, TypeSummary,
};

pub use view::{ChartSeries, ContactCard, DashboardView, FilterOption, SummaryCards};

pub use table::{change_page, refresh_table, PaginationView, TableState, TableView};

pub use transaction::{Transaction, TransactionPage, TransactionQuery};

pub use client::{ClientError, DashboardSource, HttpSource};

pub use dashboard::Dashboard;

pub use ingest::{summarize, IngestError, SmsClassifier, TransactionKind, TransactionStore};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, DataConfig, LoggingConfig};
