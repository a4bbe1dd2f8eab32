//! Display Formatting
//!
//! Currency, count, date and label formatting shared by the dashboard cards,
//! chart labels and the transaction table.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// ISO 4217 code for the Rwandan franc
pub const CURRENCY_CODE: &str = "RWF";

/// Format an amount as whole Rwandan francs, e.g. `RWF 1,000`.
///
/// RWF has no minor unit, so amounts are rounded to the nearest franc.
pub fn format_currency(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let grouped = group_thousands(rounded.abs() as u64);

    if rounded < 0.0 {
        format!("-{} {}", CURRENCY_CODE, grouped)
    } else {
        format!("{} {}", CURRENCY_CODE, grouped)
    }
}

/// Parse a string produced by [`format_currency`] back into an amount
pub fn parse_currency(text: &str) -> Option<f64> {
    let text = text.trim();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let digits: String = rest
        .trim()
        .strip_prefix(CURRENCY_CODE)
        .unwrap_or(rest)
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let value: f64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Thousands-grouped integer, e.g. `1,691`
pub fn format_count(count: u64) -> String {
    group_thousands(count)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

/// Parse the date-time formats found in transaction records.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD HH:MM` and bare dates (midnight).
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a transaction date like `Jan 5, 2024, 02:30 PM`.
///
/// Unparseable input is returned unchanged.
pub fn format_date(text: &str) -> String {
    match parse_datetime(text) {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => text.to_string(),
    }
}

/// Display form of a transaction type, e.g. `incoming_money` -> `INCOMING MONEY`
pub fn type_label(name: &str) -> String {
    name.replace('_', " ").to_uppercase()
}

/// Display form of a `YYYY-MM` key, e.g. `2024-01` -> `Jan 2024`.
///
/// Keys that are not year-month pairs are returned unchanged.
pub fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", key.trim()), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

/// Axis label for an hour of day, e.g. `9:00`
pub fn hour_label(hour: usize) -> String {
    format!("{}:00", hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1000.0), "RWF 1,000");
        assert_eq!(format_currency(0.0), "RWF 0");
        assert_eq!(format_currency(25432100.5), "RWF 25,432,101");
        assert_eq!(format_currency(999.4), "RWF 999");
        assert_eq!(format_currency(-1500.0), "-RWF 1,500");
        assert_eq!(format_currency(-0.2), "RWF 0");
        assert_eq!(format_currency(f64::NAN), "RWF 0");
    }

    #[test]
    fn test_currency_format_then_parse() {
        let formatted = format_currency(1000.0);
        assert!(!formatted.starts_with('-'));
        assert!(formatted.contains(CURRENCY_CODE));
        assert_eq!(parse_currency(&formatted), Some(1000.0));
        assert_eq!(parse_currency("-RWF 2,500"), Some(-2500.0));
        assert_eq!(parse_currency("RWF lots"), None);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05 14:30:00"), "Jan 5, 2024, 02:30 PM");
        assert_eq!(format_date("2024-05-10T09:05:00"), "May 10, 2024, 09:05 AM");
        assert_eq!(format_date("2024-05-10T09:05:00+02:00"), "May 10, 2024, 09:05 AM");
        assert_eq!(format_date("2024-12-31"), "Dec 31, 2024, 12:00 AM");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_labels() {
        assert_eq!(type_label("incoming_money"), "INCOMING MONEY");
        assert_eq!(type_label("third_party"), "THIRD PARTY");
        assert_eq!(type_label("airtime"), "AIRTIME");
        assert_eq!(month_label("2024-01"), "Jan 2024");
        assert_eq!(month_label("2023-12"), "Dec 2023");
        assert_eq!(month_label("unknown"), "unknown");
        assert_eq!(hour_label(0), "0:00");
        assert_eq!(hour_label(23), "23:00");
    }
}
