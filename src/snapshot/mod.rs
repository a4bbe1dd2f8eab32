//! Aggregate Snapshot
//!
//! The pre-aggregated summary document behind the dashboard cards and charts.
//!
//! ## Document shape
//!
//! ```xml
//! <summary>
//!   <total_transactions>42</total_transactions>
//!   <total_amount>150000</total_amount>
//!   <total_fees>1200</total_fees>
//!   <by_type><type name="payment"><count>10</count></type></by_type>
//!   <monthly_totals><month key="2024-01"><amount>50000</amount></month></monthly_totals>
//!   <hourly_distribution><hour key="09"><count>4</count></hour></hourly_distribution>
//!   <top_contacts>
//!     <contact><phone>250788123456</phone><count>3</count><amount>9000</amount></contact>
//!   </top_contacts>
//! </summary>
//! ```
//!
//! Parsing is best-effort: elements are found by name anywhere in the
//! document, any absent section yields an empty mapping and unparseable
//! numbers read as zero. Only a document that is not well-formed XML is an
//! error.

mod error;
mod parser;
mod types;
mod writer;

pub use error::{SnapshotError, SnapshotResult};
pub use parser::parse_snapshot;
pub use types::{AggregateSnapshot, MonthlyTotal, TopContact, TypeSummary, HOURS_PER_DAY};
pub use writer::write_snapshot;
