//! Snapshot aggregation
//!
//! Computes the dashboard summary from a list of transactions: totals,
//! per-type and per-month breakdowns, the hourly distribution and the most
//! frequent counterparties.

use chrono::Timelike;
use std::collections::HashMap;

use crate::format::parse_datetime;
use crate::snapshot::{AggregateSnapshot, TopContact};
use crate::transaction::Transaction;

/// Number of counterparties kept in `top_contacts`
pub const TOP_CONTACTS_LIMIT: usize = 5;

/// Aggregate transactions into a snapshot.
///
/// Transactions with an unparseable date count towards the totals and the
/// type breakdown but not towards the monthly or hourly sections.
pub fn summarize(transactions: &[Transaction]) -> AggregateSnapshot {
    let mut snapshot = AggregateSnapshot::default();
    let mut contacts: HashMap<&str, (u64, f64)> = HashMap::new();
    let mut undated = 0usize;

    for tx in transactions {
        let fee = tx.fee.unwrap_or(0.0);

        snapshot.total_transactions += 1;
        snapshot.total_amount += tx.amount;
        snapshot.total_fees += fee;

        let by_type = snapshot.by_type.entry(tx.kind.clone()).or_default();
        by_type.count += 1;
        by_type.amount += tx.amount;
        by_type.fees += fee;

        match parse_datetime(&tx.date) {
            Some(dt) => {
                let month = snapshot
                    .monthly_totals
                    .entry(dt.format("%Y-%m").to_string())
                    .or_default();
                month.count += 1;
                month.amount += tx.amount;
                month.fees += fee;

                *snapshot.hourly_distribution.entry(dt.hour() as u8).or_default() += 1;
            }
            None => undated += 1,
        }

        if let Some(phone) = tx.phone_number.as_deref().filter(|p| !p.is_empty()) {
            let entry = contacts.entry(phone).or_default();
            entry.0 += 1;
            entry.1 += tx.amount;
        }
    }

    if undated > 0 {
        tracing::debug!(undated, "Transactions without a parseable date");
    }

    let mut top: Vec<TopContact> = contacts
        .into_iter()
        .map(|(phone, (count, amount))| TopContact {
            phone: phone.to_string(),
            count,
            amount,
        })
        .collect();
    top.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.amount.total_cmp(&a.amount))
            .then_with(|| a.phone.cmp(&b.phone))
    });
    top.truncate(TOP_CONTACTS_LIMIT);
    snapshot.top_contacts = top;

    snapshot
}
