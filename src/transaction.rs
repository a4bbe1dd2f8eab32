//! Transaction Records
//!
//! Wire types of the transaction list endpoint, shared by the HTTP client,
//! the table controller and the API server.

use serde::{Deserialize, Serialize};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A single mobile-money transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Date-time as supplied by the source
    pub date: String,
    /// Type name, e.g. `payment` or `incoming_money`
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
}

/// One page of the filtered transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    /// Number of transactions matching the filters
    #[serde(default)]
    pub total: usize,
    #[serde(default = "default_page")]
    pub page: u32,
    /// Total number of pages for the filters
    pub pages: u32,
}

fn default_page() -> u32 {
    1
}

/// Parameters of a transaction list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Free-text search over details and phone number
    pub search: String,
    /// Exact type name, empty for all types
    pub type_filter: String,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
            type_filter: String::new(),
        }
    }
}

impl TransactionQuery {
    /// Query for a page with no filters
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
    }

    /// Set the free-text search
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the type filter
    pub fn type_filter(mut self, type_filter: impl Into<String>) -> Self {
        self.type_filter = type_filter.into();
        self
    }

    /// Index of the first row of the page
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.limit as usize
    }

    /// URL query string, e.g. `page=2&limit=10&search=&type=payment`
    pub fn to_query_string(&self) -> String {
        format!(
            "page={}&limit={}&search={}&type={}",
            self.page,
            self.limit,
            urlencoding::encode(&self.search),
            urlencoding::encode(&self.type_filter)
        )
    }
}

/// Number of pages needed for `total` rows at `limit` rows per page
pub fn page_count(total: usize, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit as usize) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_encodes_filters() {
        let query = TransactionQuery::new(3, 20)
            .search("Jane Doe & co")
            .type_filter("incoming_money");
        assert_eq!(
            query.to_query_string(),
            "page=3&limit=20&search=Jane%20Doe%20%26%20co&type=incoming_money"
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(TransactionQuery::new(1, 10).offset(), 0);
        assert_eq!(TransactionQuery::new(3, 10).offset(), 20);
        assert_eq!(TransactionQuery::new(0, 10).offset(), 0);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn test_page_deserializes_with_defaults() {
        let json = r#"{
            "transactions": [{
                "date": "2024-05-10 09:05:00",
                "type": "payment",
                "amount": 1500.0,
                "phone_number": null,
                "details": "You have paid 1,500 RWF to Jane"
            }],
            "pages": 4
        }"#;

        let page: TransactionPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 4);
        assert_eq!(page.transactions[0].kind, "payment");
        assert!(page.transactions[0].phone_number.is_none());
        assert!(page.transactions[0].reference_id.is_none());
    }
}
