//! Text rendering
//!
//! Draws the dashboard and the transaction table for a terminal: cards as
//! labelled lines, charts as horizontal bar charts.

use std::fmt::Write;

use super::model::{ChartSeries, DashboardView};
use crate::format::format_count;
use crate::table::TableView;

/// Width of the longest bar, in characters
pub const BAR_WIDTH: usize = 40;

const BAR_CHAR: char = '█';

/// Render the whole dashboard
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "MoMo Transactions Dashboard");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "{:<22} {}", "Total Transactions:", view.cards.total_transactions);
    let _ = writeln!(out, "{:<22} {}", "Total Amount:", view.cards.total_amount);
    let _ = writeln!(out, "{:<22} {}", "Total Fees:", view.cards.total_fees);
    let _ = writeln!(out, "{:<22} {}", "Most Common Type:", view.cards.most_common_type);

    for chart in [&view.type_chart, &view.monthly_chart, &view.hourly_chart] {
        let _ = writeln!(out);
        out.push_str(&render_bar_chart(chart, BAR_WIDTH));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top Contacts");
    let _ = writeln!(out, "{}", "-".repeat(60));
    if view.top_contacts.is_empty() {
        let _ = writeln!(out, "No contacts");
    }
    for contact in &view.top_contacts {
        let _ = writeln!(
            out,
            "#{} {:<16} {:>6} transactions   Total Amount: {}",
            contact.rank, contact.phone, contact.count, contact.amount
        );
    }

    out
}

/// Render one chart as horizontal bars scaled to `width`
pub fn render_bar_chart(chart: &ChartSeries, width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", chart.title);
    let _ = writeln!(out, "{}", "-".repeat(60));

    if chart.is_empty() {
        let _ = writeln!(out, "No data");
        return out;
    }

    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max = chart.max_value();

    for (label, value) in chart.labels.iter().zip(&chart.values) {
        let bar_len = if max > 0.0 {
            ((value / max) * width as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:<lw$} | {:<bw$} {}",
            label,
            BAR_CHAR.to_string().repeat(bar_len),
            format_value(*value),
            lw = label_width,
            bw = width
        );
    }

    out
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value >= 0.0 {
        format_count(value as u64)
    } else {
        format!("{:.2}", value)
    }
}

/// Render a page of the transaction table with its pagination line
pub fn render_table(view: &TableView) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<24} {:<16} {:>14} {:<14} {:<12} {}",
        "Date", "Type", "Amount", "Phone", "Reference", "Details"
    );
    let _ = writeln!(out, "{}", "-".repeat(110));

    if view.rows.is_empty() {
        let _ = writeln!(out, "No transactions found");
    }

    for row in &view.rows {
        let _ = writeln!(
            out,
            "{:<24} {:<16} {:>14} {:<14} {:<12} {}",
            row.date, row.kind, row.amount, row.phone_number, row.reference_id, row.details
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_pagination(view));
    out
}

fn render_pagination(view: &TableView) -> String {
    let p = &view.pagination;
    let mut parts = Vec::with_capacity(p.buttons.len() + 2);

    parts.push(if p.first_disabled { "«".to_string() } else { "[«]".to_string() });
    if p.buttons.first().is_some_and(|b| b.page > 1) {
        parts.push("…".to_string());
    }
    for button in &p.buttons {
        if button.active {
            parts.push(format!("({})", button.page));
        } else {
            parts.push(button.page.to_string());
        }
    }
    if p.buttons.last().is_some_and(|b| b.page < p.total_pages) {
        parts.push("…".to_string());
    }
    parts.push(if p.last_disabled { "»".to_string() } else { "[»]".to_string() });

    format!(
        "{}   page {} of {} ({} transactions)",
        parts.join(" "),
        p.current_page,
        p.total_pages,
        format_count(view.total as u64)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::AggregateSnapshot;
    use crate::table::{PaginationView, TableRow};

    #[test]
    fn test_bar_chart_scales_to_max() {
        let chart = ChartSeries {
            title: "Number of Transactions".to_string(),
            labels: vec!["PAYMENT".to_string(), "AIRTIME".to_string()],
            values: vec![10.0, 5.0],
        };

        let text = render_bar_chart(&chart, 10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Number of Transactions");
        assert_eq!(lines[2].matches(BAR_CHAR).count(), 10);
        assert_eq!(lines[3].matches(BAR_CHAR).count(), 5);
        assert!(lines[2].ends_with(" 10"));
    }

    #[test]
    fn test_empty_chart() {
        let chart = ChartSeries {
            title: "Total Amount (RWF)".to_string(),
            labels: Vec::new(),
            values: Vec::new(),
        };
        assert!(render_bar_chart(&chart, 10).contains("No data"));
    }

    #[test]
    fn test_render_empty_dashboard() {
        let view = DashboardView::build(&AggregateSnapshot::default());
        let text = render_dashboard(&view);
        assert!(text.contains("Total Transactions:    0"));
        assert!(text.contains("Most Common Type:      -"));
        assert!(text.contains("23:00"));
        assert!(text.contains("No contacts"));
    }

    #[test]
    fn test_render_table() {
        let view = TableView {
            rows: vec![TableRow {
                date: "Jan 5, 2024, 02:30 PM".to_string(),
                kind: "PAYMENT".to_string(),
                amount: "RWF 1,000".to_string(),
                phone_number: "-".to_string(),
                reference_id: "ABC123".to_string(),
                details: "You have paid 1,000 RWF".to_string(),
            }],
            pagination: PaginationView::new(2, 3),
            total: 25,
        };

        let text = render_table(&view);
        assert!(text.contains("ABC123"));
        assert!(text.contains("[«] 1 (2) 3 [»]"));
        assert!(text.contains("page 2 of 3 (25 transactions)"));
    }

    #[test]
    fn test_render_pagination_window() {
        let view = TableView {
            rows: Vec::new(),
            pagination: PaginationView::new(20, 40),
            total: 400,
        };

        let text = render_table(&view);
        assert!(text.contains("[«] … 15 16 17 18 19 (20) 21 22 23 24 … [»]"));
        assert!(text.contains("page 20 of 40 (400 transactions)"));
    }
}
