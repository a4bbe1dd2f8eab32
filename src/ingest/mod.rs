//! Transaction Ingest
//!
//! Server-side data for the dashboard:
//!
//! - **Classification**: turn raw MoMo SMS bodies into typed transactions
//! - **Store**: load transaction XML, filter and paginate it
//! - **Aggregation**: summarize the store into an `AggregateSnapshot`
//!
//! ## Input document
//!
//! ```xml
//! <transactions>
//!   <transaction>
//!     <transaction_id>76662021700</transaction_id>
//!     <phone_number>250795963036</phone_number>
//!     <amount>2000</amount>
//!     <date>2024-05-10 16:30:51</date>
//!     <details>You have received 2000 RWF from Jane Smith (*********013).</details>
//!   </transaction>
//! </transactions>
//! ```
//!
//! SMS backup exports (`<smses><sms body="..." date="1715351451000"/></smses>`)
//! are accepted as well; messages that match no pattern are skipped.

mod aggregate;
mod error;
mod sms;
mod store;

pub use aggregate::{summarize, TOP_CONTACTS_LIMIT};
pub use error::{IngestError, IngestResult};
pub use sms::{ParsedSms, SmsClassifier, TransactionKind};
pub use store::TransactionStore;
