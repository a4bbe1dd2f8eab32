//! Dashboard View Model
//!
//! Maps an [`AggregateSnapshot`](crate::snapshot::AggregateSnapshot) into
//! render-ready cards and chart series, and draws them as text.
//!
//! The view model knows nothing about how charts are drawn; `render` is one
//! consumer of it, the JSON output of the CLI is another.

mod model;
pub mod render;

pub use model::{ChartSeries, ContactCard, DashboardView, FilterOption, SummaryCards, PLACEHOLDER};
