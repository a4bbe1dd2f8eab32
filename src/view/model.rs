//! Dashboard view model types

use serde::Serialize;

use crate::format::{format_count, format_currency, hour_label, month_label, type_label};
use crate::snapshot::{AggregateSnapshot, HOURS_PER_DAY};

/// Placeholder shown when a card has no value
pub const PLACEHOLDER: &str = "-";

/// Everything the dashboard page renders from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: SummaryCards,
    /// Options for the transaction type filter, "All Types" first
    pub type_filter: Vec<FilterOption>,
    pub type_chart: ChartSeries,
    pub monthly_chart: ChartSeries,
    /// Always exactly 24 points
    pub hourly_chart: ChartSeries,
    pub top_contacts: Vec<ContactCard>,
}

/// Headline numbers above the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub total_transactions: String,
    pub total_amount: String,
    pub total_fees: String,
    pub most_common_type: String,
}

/// One entry of the type filter dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Raw type name sent to the transaction list endpoint (empty = all)
    pub value: String,
    pub label: String,
}

/// A single chart: parallel label and value vectors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// A ranked counterparty card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactCard {
    /// 1-based rank
    pub rank: usize,
    pub phone: String,
    pub count: u64,
    pub amount: String,
}

impl ChartSeries {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    fn push(&mut self, label: String, value: f64) {
        self.labels.push(label);
        self.values.push(value);
    }

    /// Number of points in the series
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series has no points
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest value, zero for an empty series
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

impl DashboardView {
    /// Build the view model for a snapshot
    pub fn build(snapshot: &AggregateSnapshot) -> Self {
        let most_common_type = snapshot
            .most_common_type()
            .map(|(name, _)| type_label(name))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let cards = SummaryCards {
            total_transactions: format_count(snapshot.total_transactions),
            total_amount: format_currency(snapshot.total_amount),
            total_fees: format_currency(snapshot.total_fees),
            most_common_type,
        };

        let mut type_filter = vec![FilterOption {
            value: String::new(),
            label: "All Types".to_string(),
        }];
        let mut type_chart = ChartSeries::new("Number of Transactions");
        for (name, summary) in &snapshot.by_type {
            type_filter.push(FilterOption {
                value: name.clone(),
                label: type_label(name),
            });
            type_chart.push(type_label(name), summary.count as f64);
        }

        let mut monthly_chart = ChartSeries::new("Total Amount (RWF)");
        for (key, month) in &snapshot.monthly_totals {
            monthly_chart.push(month_label(key), month.amount);
        }

        let mut hourly_chart = ChartSeries::new("Transaction Count");
        for (hour, count) in snapshot.hourly_slots().iter().enumerate() {
            hourly_chart.push(hour_label(hour), *count as f64);
        }
        debug_assert_eq!(hourly_chart.len(), HOURS_PER_DAY);

        let top_contacts = snapshot
            .top_contacts
            .iter()
            .enumerate()
            .map(|(i, contact)| ContactCard {
                rank: i + 1,
                phone: contact.phone.clone(),
                count: contact.count,
                amount: format_currency(contact.amount),
            })
            .collect();

        Self {
            cards,
            type_filter,
            type_chart,
            monthly_chart,
            hourly_chart,
            top_contacts,
        }
    }
}
