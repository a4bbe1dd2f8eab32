//! In-memory transaction store
//!
//! Loaded once at startup and read-only afterwards, so it can be shared
//! between request handlers behind an `Arc` without locking.

use serde::Deserialize;
use std::path::Path;

use super::aggregate::summarize;
use super::error::{IngestError, IngestResult};
use super::sms::SmsClassifier;
use crate::snapshot::AggregateSnapshot;
use crate::transaction::{page_count, Transaction, TransactionPage, TransactionQuery};

/// Type assigned to records whose details match no known pattern
pub const UNKNOWN_KIND: &str = "unknown";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    #[serde(rename = "transaction")]
    transactions: Vec<RawTransaction>,
    #[serde(rename = "sms")]
    messages: Vec<RawSms>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTransaction {
    transaction_id: Option<String>,
    phone_number: Option<String>,
    amount: Option<String>,
    date: Option<String>,
    details: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    reference_id: Option<String>,
    fee: Option<String>,
    balance: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSms {
    #[serde(rename = "@body")]
    body: Option<String>,
    /// Milliseconds since the Unix epoch
    #[serde(rename = "@date")]
    date: Option<String>,
}

/// All known transactions, in document order
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Store over an existing list of transactions
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Load a transaction document from disk
    pub fn load(path: &Path, classifier: &SmsClassifier) -> IngestResult<Self> {
        let xml = std::fs::read_to_string(path).map_err(|e| IngestError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let store = Self::from_xml(&xml, classifier)?;
        tracing::info!(path = ?path, transactions = store.len(), "Loaded transactions");
        Ok(store)
    }

    /// Parse a transaction document.
    ///
    /// `<transaction>` records without a `type` are classified from their
    /// details, falling back to `unknown`. `<sms>` messages that match no
    /// pattern are skipped.
    pub fn from_xml(xml: &str, classifier: &SmsClassifier) -> IngestResult<Self> {
        let raw: RawDocument = quick_xml::de::from_str(xml)?;
        let mut transactions = Vec::with_capacity(raw.transactions.len() + raw.messages.len());
        let mut skipped = 0usize;

        for record in raw.transactions {
            match convert_record(record, classifier) {
                Some(tx) => transactions.push(tx),
                None => skipped += 1,
            }
        }

        for message in raw.messages {
            match convert_sms(message, classifier) {
                Some(tx) => transactions.push(tx),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "Skipped unusable transaction records");
        }

        Ok(Self { transactions })
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when the store holds no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// All transactions
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Filter and paginate.
    ///
    /// `search` matches details or phone number, case-insensitively; an
    /// empty `type_filter` matches every type. Pages past the end are empty.
    pub fn query(&self, query: &TransactionQuery) -> TransactionPage {
        let search = query.search.to_lowercase();

        let matches: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| {
                search.is_empty()
                    || t.details.to_lowercase().contains(&search)
                    || t
                        .phone_number
                        .as_deref()
                        .is_some_and(|p| p.to_lowercase().contains(&search))
            })
            .filter(|t| query.type_filter.is_empty() || t.kind == query.type_filter)
            .collect();

        let total = matches.len();
        let transactions = matches
            .into_iter()
            .skip(query.offset())
            .take(query.limit as usize)
            .cloned()
            .collect();

        TransactionPage {
            transactions,
            total,
            page: query.page,
            pages: page_count(total, query.limit),
        }
    }

    /// Aggregate every transaction into a snapshot
    pub fn summarize(&self) -> AggregateSnapshot {
        summarize(&self.transactions)
    }
}

fn convert_record(record: RawTransaction, classifier: &SmsClassifier) -> Option<Transaction> {
    let details = record.details.map(|d| d.trim().to_string()).unwrap_or_default();

    let amount = match record.amount.as_deref().map(str::trim) {
        Some(text) => match text.replace(',', "").parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    transaction_id = ?record.transaction_id,
                    amount = %text,
                    "Skipping transaction with invalid amount"
                );
                return None;
            }
        },
        None => classifier.parse_amount(&details).unwrap_or(0.0),
    };

    let kind = record
        .kind
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .or_else(|| classifier.kind_of(&details).map(|k| k.as_str().to_string()))
        .unwrap_or_else(|| UNKNOWN_KIND.to_string());

    let phone_number = non_empty(record.phone_number).or_else(|| classifier.parse_phone_number(&details));
    let reference_id = non_empty(record.reference_id).or_else(|| classifier.parse_reference(&details));

    Some(Transaction {
        transaction_id: non_empty(record.transaction_id),
        date: record.date.map(|d| d.trim().to_string()).unwrap_or_default(),
        kind,
        amount,
        phone_number,
        reference_id,
        details,
        balance: parse_optional_amount(record.balance.as_deref()),
        fee: parse_optional_amount(record.fee.as_deref()),
    })
}

fn convert_sms(message: RawSms, classifier: &SmsClassifier) -> Option<Transaction> {
    let body = message.body?;
    let parsed = classifier.classify(&body)?;

    let date = message
        .date
        .as_deref()
        .and_then(|d| d.trim().parse::<i64>().ok())
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();

    Some(parsed.into_transaction(date, None))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_optional_amount(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.trim().replace(',', "").parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<transactions>
  <transaction>
    <transaction_id>1</transaction_id>
    <phone_number>250795963036</phone_number>
    <amount>2000</amount>
    <date>2024-05-10 16:30:51</date>
    <details>You have received 2000 RWF from Jane Smith (*********013).</details>
  </transaction>
  <transaction>
    <transaction_id>2</transaction_id>
    <phone_number>250788110381</phone_number>
    <amount>1,000</amount>
    <date>2024-05-11 09:15:00</date>
    <details>You have paid 1,000 RWF to Samuel Carter. Fee: 20 RWF</details>
    <fee>20</fee>
  </transaction>
  <transaction>
    <transaction_id>3</transaction_id>
    <amount>500</amount>
    <date>2024-06-01 21:00:00</date>
    <details>Monthly statement</details>
  </transaction>
  <transaction>
    <transaction_id>4</transaction_id>
    <amount>n/a</amount>
    <details>broken</details>
  </transaction>
</transactions>"#;

    fn store() -> TransactionStore {
        TransactionStore::from_xml(DOCUMENT, &SmsClassifier::new().unwrap()).unwrap()
    }

    #[test]
    fn test_load_transaction_records() {
        let store = store();
        assert_eq!(store.len(), 3);

        let txs = store.transactions();
        assert_eq!(txs[0].kind, "incoming_money");
        assert_eq!(txs[1].kind, "payment");
        assert_eq!(txs[1].amount, 1000.0);
        assert_eq!(txs[1].fee, Some(20.0));
        assert_eq!(txs[2].kind, UNKNOWN_KIND);
        assert!(txs[2].phone_number.is_none());
    }

    #[test]
    fn test_load_sms_backup() {
        let xml = r#"<smses count="3">
            <sms protocol="0" address="M-Money" date="1715358651000" body="You have received 2000 RWF from Jane Smith (*********013)." />
            <sms protocol="0" address="M-Money" date="1715418900000" body="You have bought Airtime worth 3000 RWF. Fee: 0 RWF" />
            <sms protocol="0" address="M-Money" date="1715418900000" body="Your one-time code is 4412" />
        </smses>"#;

        let store = TransactionStore::from_xml(xml, &SmsClassifier::new().unwrap()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[0].kind, "incoming_money");
        assert_eq!(store.transactions()[0].date, "2024-05-10 16:30:51");
        assert_eq!(store.transactions()[1].kind, "airtime");
    }

    #[test]
    fn test_sms_backup_with_interleaved_mms() {
        let xml = r#"<smses count="3">
            <sms date="1715358651000" body="You have received 2000 RWF from Jane Smith (*********013)." />
            <mms date="1715358700000" m_type="132" />
            <sms date="1715418900000" body="You have bought Airtime worth 3000 RWF. Fee: 0 RWF" />
        </smses>"#;

        let store = TransactionStore::from_xml(xml, &SmsClassifier::new().unwrap()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[1].kind, "airtime");
    }

    #[test]
    fn test_query_search_and_type() {
        let store = store();

        let page = store.query(&TransactionQuery::new(1, 10).search("SAMUEL"));
        assert_eq!(page.total, 1);
        assert_eq!(page.transactions[0].transaction_id.as_deref(), Some("2"));

        let page = store.query(&TransactionQuery::new(1, 10).search("250795"));
        assert_eq!(page.total, 1);

        let page = store.query(&TransactionQuery::new(1, 10).type_filter("payment"));
        assert_eq!(page.total, 1);

        let page = store.query(&TransactionQuery::new(1, 10).type_filter("withdrawal"));
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
    }

    #[test]
    fn test_query_pagination() {
        let store = store();

        let page = store.query(&TransactionQuery::new(1, 2));
        assert_eq!(page.transactions.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);

        let page = store.query(&TransactionQuery::new(2, 2));
        assert_eq!(page.transactions.len(), 1);
        assert_eq!(page.page, 2);

        let page = store.query(&TransactionQuery::new(5, 2));
        assert!(page.transactions.is_empty());
        assert_eq!(page.pages, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let classifier = SmsClassifier::new().unwrap();
        let err = TransactionStore::load(Path::new("/nonexistent/data.xml"), &classifier).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
