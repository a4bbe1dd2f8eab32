//! Snapshot data types
//!
//! `AggregateSnapshot` is the flat record every renderer consumes. It is built
//! once per dashboard load and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of slots in the hourly distribution
pub const HOURS_PER_DAY: usize = 24;

/// Pre-aggregated summary of all transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    /// Total number of transactions
    pub total_transactions: u64,
    /// Sum of all transaction amounts (RWF)
    pub total_amount: f64,
    /// Sum of all transaction fees (RWF)
    pub total_fees: f64,
    /// Breakdown keyed by transaction type name
    pub by_type: BTreeMap<String, TypeSummary>,
    /// Totals keyed by `YYYY-MM`
    pub monthly_totals: BTreeMap<String, MonthlyTotal>,
    /// Transaction count keyed by hour of day (0-23)
    pub hourly_distribution: BTreeMap<u8, u64>,
    /// Most frequent counterparties, in rank order
    pub top_contacts: Vec<TopContact>,
}

/// Per-type breakdown entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub count: u64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub fees: f64,
}

/// Per-month totals entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub amount: f64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub fees: f64,
}

/// A frequent counterparty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopContact {
    pub phone: String,
    pub count: u64,
    pub amount: f64,
}

impl AggregateSnapshot {
    /// Count for a transaction type, zero when the type is absent
    pub fn type_count(&self, name: &str) -> u64 {
        self.by_type.get(name).map(|t| t.count).unwrap_or(0)
    }

    /// Amount for a month key, zero when the month is absent
    pub fn month_amount(&self, key: &str) -> f64 {
        self.monthly_totals.get(key).map(|m| m.amount).unwrap_or(0.0)
    }

    /// Count for an hour of day, zero when the hour is absent
    pub fn hour_count(&self, hour: u8) -> u64 {
        self.hourly_distribution.get(&hour).copied().unwrap_or(0)
    }

    /// The full 24-slot hourly distribution, absent hours filled with zero
    pub fn hourly_slots(&self) -> [u64; HOURS_PER_DAY] {
        let mut slots = [0u64; HOURS_PER_DAY];
        for (&hour, &count) in &self.hourly_distribution {
            if let Some(slot) = slots.get_mut(hour as usize) {
                *slot = count;
            }
        }
        slots
    }

    /// Type with the highest non-zero count.
    ///
    /// Ties keep the first type in key order.
    pub fn most_common_type(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (name, summary) in &self.by_type {
            let current = best.map(|(_, count)| count).unwrap_or(0);
            if summary.count > current {
                best = Some((name.as_str(), summary.count));
            }
        }
        best
    }

    /// True when no section carried any data
    pub fn is_empty(&self) -> bool {
        self.total_transactions == 0
            && self.by_type.is_empty()
            && self.monthly_totals.is_empty()
            && self.hourly_distribution.is_empty()
            && self.top_contacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AggregateSnapshot {
        let mut snapshot = AggregateSnapshot::default();
        snapshot.by_type.insert(
            "payment".to_string(),
            TypeSummary { count: 7, ..Default::default() },
        );
        snapshot.by_type.insert(
            "airtime".to_string(),
            TypeSummary { count: 7, ..Default::default() },
        );
        snapshot.by_type.insert(
            "transfer".to_string(),
            TypeSummary { count: 2, ..Default::default() },
        );
        snapshot.hourly_distribution.insert(9, 4);
        snapshot.hourly_distribution.insert(23, 1);
        snapshot
    }

    #[test]
    fn test_absent_keys_read_as_zero() {
        let snapshot = sample();
        assert_eq!(snapshot.type_count("withdrawal"), 0);
        assert_eq!(snapshot.month_amount("2024-01"), 0.0);
        assert_eq!(snapshot.hour_count(3), 0);
    }

    #[test]
    fn test_hourly_slots() {
        let slots = sample().hourly_slots();
        assert_eq!(slots.len(), HOURS_PER_DAY);
        assert_eq!(slots[9], 4);
        assert_eq!(slots[23], 1);
        assert_eq!(slots.iter().sum::<u64>(), 5);
    }

    #[test]
    fn test_most_common_type_tie_keeps_first() {
        let snapshot = sample();
        assert_eq!(snapshot.most_common_type(), Some(("airtime", 7)));
    }

    #[test]
    fn test_most_common_type_ignores_zero_counts() {
        let mut snapshot = AggregateSnapshot::default();
        snapshot
            .by_type
            .insert("payment".to_string(), TypeSummary::default());
        assert_eq!(snapshot.most_common_type(), None);
        assert!(!snapshot.is_empty());
        assert!(AggregateSnapshot::default().is_empty());
    }
}
