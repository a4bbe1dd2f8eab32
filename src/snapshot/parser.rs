//! Snapshot document parser
//!
//! Reads the XML event stream into a small element tree, then looks values
//! up by element name anywhere below the root. Sections may be wrapped,
//! repeated or interleaved with unknown markup; the first occurrence of a
//! scalar wins and entries of repeated sections are merged in document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

use super::error::{SnapshotError, SnapshotResult};
use super::types::{AggregateSnapshot, MonthlyTotal, TopContact, TypeSummary, HOURS_PER_DAY};

const SECTIONS: [&str; 7] = [
    "total_transactions",
    "total_amount",
    "total_fees",
    "by_type",
    "monthly_totals",
    "hourly_distribution",
    "top_contacts",
];

#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    /// Text of this element and all its descendants, in document order
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> quick_xml::Result<Self> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            attributes.push((
                String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned(),
                attr.unescape_value()?.into_owned(),
            ));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            attributes,
            ..Default::default()
        })
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First descendant with the given name, in document order
    fn find(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find_map(|child| if child.name == name { Some(child) } else { child.find(name) })
    }

    fn find_text(&self, name: &str) -> Option<String> {
        self.find(name).map(|element| element.text.clone())
    }

    fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Every `item` element that has a `section` ancestor, in document order
    fn entries<'a>(&'a self, section: &str, item: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.collect_entries(section, item, false, &mut out);
        out
    }

    fn collect_entries<'a>(
        &'a self,
        section: &str,
        item: &str,
        inside: bool,
        out: &mut Vec<&'a Element>,
    ) {
        for child in &self.children {
            if inside && child.name == item {
                out.push(child);
            }
            child.collect_entries(section, item, inside || child.name == section, out);
        }
    }
}

/// Build the element tree under a synthetic document node
fn read_document(xml: &str) -> SnapshotResult<Element> {
    let mut reader = Reader::from_str(xml);
    reader.check_end_names(true);

    let mut stack = vec![Element::default()];
    let mut has_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(Element::from_start(&start)?);
                has_root = true;
            }
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(element);
                }
                has_root = true;
            }
            Event::End(end) => {
                if stack.len() < 2 {
                    return Err(SnapshotError::Malformed(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.local_name().as_ref())
                    )));
                }
                if let Some(element) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(element);
                    }
                }
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                for open in stack.iter_mut().skip(1) {
                    open.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                let data = data.into_inner();
                let text = String::from_utf8_lossy(&data);
                for open in stack.iter_mut().skip(1) {
                    open.text.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        let open = stack.last().map(|e| e.name.clone()).unwrap_or_default();
        return Err(SnapshotError::Malformed(format!("unclosed element <{}>", open)));
    }
    if !has_root {
        return Err(SnapshotError::Malformed("no root element".to_string()));
    }

    Ok(stack.pop().unwrap_or_default())
}

/// Parse a snapshot document into an [`AggregateSnapshot`].
///
/// Absent sections produce empty mappings; absent or malformed numbers read
/// as zero. Fails only when the input is not well-formed XML.
pub fn parse_snapshot(xml: &str) -> SnapshotResult<AggregateSnapshot> {
    let document = read_document(xml)?;

    let snapshot = AggregateSnapshot {
        total_transactions: parse_count(
            "total_transactions",
            document.find_text("total_transactions").as_deref(),
        ),
        total_amount: parse_amount("total_amount", document.find_text("total_amount").as_deref()),
        total_fees: parse_amount("total_fees", document.find_text("total_fees").as_deref()),
        by_type: convert_by_type(&document),
        monthly_totals: convert_monthly(&document),
        hourly_distribution: convert_hourly(&document),
        top_contacts: convert_contacts(&document),
    };

    if !SECTIONS.iter().any(|name| document.contains(name)) && document.find("summary").is_none() {
        tracing::warn!("Snapshot document has no summary sections, using an empty snapshot");
    }

    tracing::debug!(
        types = snapshot.by_type.len(),
        months = snapshot.monthly_totals.len(),
        hours = snapshot.hourly_distribution.len(),
        contacts = snapshot.top_contacts.len(),
        "Parsed snapshot document"
    );

    Ok(snapshot)
}

// A repeated type name or month key keeps the last entry.
fn convert_by_type(document: &Element) -> BTreeMap<String, TypeSummary> {
    let mut by_type = BTreeMap::new();
    for entry in document.entries("by_type", "type") {
        let Some(name) = entry.attribute("name") else {
            tracing::warn!("Skipping by_type entry without a name attribute");
            continue;
        };
        by_type.insert(
            name.to_string(),
            TypeSummary {
                count: parse_count("by_type/count", entry.find_text("count").as_deref()),
                amount: parse_amount("by_type/amount", entry.find_text("amount").as_deref()),
                fees: parse_amount("by_type/fees", entry.find_text("fees").as_deref()),
            },
        );
    }
    by_type
}

fn convert_monthly(document: &Element) -> BTreeMap<String, MonthlyTotal> {
    let mut monthly = BTreeMap::new();
    for entry in document.entries("monthly_totals", "month") {
        let Some(key) = entry.attribute("key") else {
            tracing::warn!("Skipping monthly_totals entry without a key attribute");
            continue;
        };
        monthly.insert(
            key.to_string(),
            MonthlyTotal {
                amount: parse_amount("monthly_totals/amount", entry.find_text("amount").as_deref()),
                count: parse_count("monthly_totals/count", entry.find_text("count").as_deref()),
                fees: parse_amount("monthly_totals/fees", entry.find_text("fees").as_deref()),
            },
        );
    }
    monthly
}

fn convert_hourly(document: &Element) -> BTreeMap<u8, u64> {
    let mut hourly = BTreeMap::new();
    for entry in document.entries("hourly_distribution", "hour") {
        let key = entry.attribute("key").map(str::trim).unwrap_or_default();
        match key.parse::<u8>() {
            Ok(hour) if (hour as usize) < HOURS_PER_DAY => {
                let count = entry.find_text("count");
                hourly.insert(hour, parse_count("hourly_distribution/count", count.as_deref()));
            }
            _ => {
                tracing::warn!(key = %key, "Skipping hourly_distribution entry with invalid hour");
            }
        }
    }
    hourly
}

fn convert_contacts(document: &Element) -> Vec<TopContact> {
    document
        .entries("top_contacts", "contact")
        .into_iter()
        .map(|entry| TopContact {
            phone: entry
                .find_text("phone")
                .map(|p| p.trim().to_string())
                .unwrap_or_default(),
            count: parse_count("top_contacts/count", entry.find_text("count").as_deref()),
            amount: parse_amount("top_contacts/amount", entry.find_text("amount").as_deref()),
        })
        .collect()
}

/// Integer field; a decimal value is truncated, anything else reads as zero
fn parse_count(field: &str, value: Option<&str>) -> u64 {
    let Some(text) = value.map(str::trim).filter(|t| !t.is_empty()) else {
        return 0;
    };

    if let Ok(count) = text.parse::<u64>() {
        return count;
    }

    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.trunc() as u64,
        _ => {
            tracing::debug!(field = %field, value = %text, "Unparseable count, using 0");
            0
        }
    }
}

/// Decimal field; anything unparseable reads as zero
fn parse_amount(field: &str, value: Option<&str>) -> f64 {
    let Some(text) = value.map(str::trim).filter(|t| !t.is_empty()) else {
        return 0.0;
    };

    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            tracing::debug!(field = %field, value = %text, "Unparseable amount, using 0");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<summary>
  <total_transactions>1691</total_transactions>
  <total_amount>25432100.5</total_amount>
  <total_fees>41200</total_fees>
  <by_type>
    <type name="incoming_money"><count>402</count></type>
    <type name="payment"><count>880</count></type>
    <type name="airtime"><count>409</count></type>
  </by_type>
  <monthly_totals>
    <month key="2024-05"><amount>1200000</amount></month>
    <month key="2024-06"><amount>980500.25</amount></month>
  </monthly_totals>
  <hourly_distribution>
    <hour key="07"><count>12</count></hour>
    <hour key="18"><count>33</count></hour>
  </hourly_distribution>
  <top_contacts>
    <contact><phone>250788110381</phone><count>41</count><amount>620000</amount></contact>
    <contact><phone>250795963036</phone><count>19</count><amount>88000</amount></contact>
  </top_contacts>
</summary>"#;

    #[test]
    fn test_parse_full_document() {
        let snapshot = parse_snapshot(FULL_DOCUMENT).unwrap();

        assert_eq!(snapshot.total_transactions, 1691);
        assert_eq!(snapshot.total_amount, 25432100.5);
        assert_eq!(snapshot.total_fees, 41200.0);

        assert_eq!(snapshot.by_type.len(), 3);
        assert_eq!(snapshot.type_count("incoming_money"), 402);
        assert_eq!(snapshot.type_count("payment"), 880);
        assert_eq!(snapshot.type_count("airtime"), 409);

        assert_eq!(snapshot.monthly_totals.len(), 2);
        assert_eq!(snapshot.month_amount("2024-05"), 1200000.0);
        assert_eq!(snapshot.month_amount("2024-06"), 980500.25);

        assert_eq!(snapshot.hour_count(7), 12);
        assert_eq!(snapshot.hour_count(18), 33);

        assert_eq!(snapshot.top_contacts.len(), 2);
        assert_eq!(snapshot.top_contacts[0].phone, "250788110381");
        assert_eq!(snapshot.top_contacts[0].count, 41);
        assert_eq!(snapshot.top_contacts[1].amount, 88000.0);
    }

    #[test]
    fn test_missing_hourly_section_yields_zero_slots() {
        let xml = r#"<summary>
            <total_transactions>3</total_transactions>
            <by_type><type name="payment"><count>3</count></type></by_type>
        </summary>"#;

        let snapshot = parse_snapshot(xml).unwrap();
        assert!(snapshot.hourly_distribution.is_empty());
        assert_eq!(snapshot.hourly_slots(), [0u64; HOURS_PER_DAY]);
        assert!(snapshot.monthly_totals.is_empty());
        assert!(snapshot.top_contacts.is_empty());
    }

    #[test]
    fn test_empty_root_is_partial_record() {
        let snapshot = parse_snapshot("<summary/>").unwrap();
        assert_eq!(snapshot, AggregateSnapshot::default());
    }

    #[test]
    fn test_malformed_numbers_read_as_zero() {
        let xml = r#"<summary>
            <total_transactions>lots</total_transactions>
            <total_amount></total_amount>
            <by_type><type name="payment"><count>12.9</count></type></by_type>
            <top_contacts><contact><phone>0788000000</phone><count>x</count></contact></top_contacts>
        </summary>"#;

        let snapshot = parse_snapshot(xml).unwrap();
        assert_eq!(snapshot.total_transactions, 0);
        assert_eq!(snapshot.total_amount, 0.0);
        assert_eq!(snapshot.type_count("payment"), 12);
        assert_eq!(snapshot.top_contacts[0].count, 0);
        assert_eq!(snapshot.top_contacts[0].amount, 0.0);
    }

    #[test]
    fn test_invalid_hour_keys_are_skipped() {
        let xml = r#"<summary><hourly_distribution>
            <hour key="24"><count>5</count></hour>
            <hour key="noon"><count>5</count></hour>
            <hour key="0"><count>2</count></hour>
        </hourly_distribution></summary>"#;

        let snapshot = parse_snapshot(xml).unwrap();
        assert_eq!(snapshot.hourly_distribution.len(), 1);
        assert_eq!(snapshot.hour_count(0), 2);
    }

    #[test]
    fn test_unnamed_type_is_skipped() {
        let xml = r#"<summary><by_type>
            <type><count>5</count></type>
            <type name="transfer"><count>1</count></type>
        </by_type></summary>"#;

        let snapshot = parse_snapshot(xml).unwrap();
        assert_eq!(snapshot.by_type.len(), 1);
        assert_eq!(snapshot.type_count("transfer"), 1);
    }

    #[test]
    fn test_not_well_formed_is_error() {
        assert!(matches!(
            parse_snapshot("<summary><total_amount>5</total_amount>"),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            parse_snapshot("<summary><total_fees>5</total_amount></summary>"),
            Err(SnapshotError::Xml(_))
        ));
        assert!(parse_snapshot("</summary>").is_err());
        assert!(parse_snapshot("").is_err());
    }

    #[test]
    fn test_unknown_element_between_entries() {
        let xml = r#"<summary><by_type>
            <type name="payment"><count>3</count></type>
            <note>generated nightly</note>
            <type name="airtime"><count>2</count></type>
        </by_type></summary>"#;

        let snapshot = parse_snapshot(xml).unwrap();
        assert_eq!(snapshot.by_type.len(), 2);
        assert_eq!(snapshot.type_count("payment"), 3);
        assert_eq!(snapshot.type_count("airtime"), 2);
    }

    #[test]
    fn test_repeated_sections_are_merged() {
        let xml = r#"<summary>
            <by_type><type name="payment"><count>3</count></type></by_type>
            <top_contacts><contact><phone>250788000001</phone><count>4</count></contact></top_contacts>
            <by_type><type name="transfer"><count>1</count></type></by_type>
            <top_contacts><contact><phone>250788000002</phone><count>2</count></contact></top_contacts>
        </summary>"#;

        let snapshot = parse_snapshot(xml).unwrap();
        assert_eq!(snapshot.type_count("payment"), 3);
        assert_eq!(snapshot.type_count("transfer"), 1);
        let phones: Vec<&str> = snapshot.top_contacts.iter().map(|c| c.phone.as_str()).collect();
        assert_eq!(phones, vec!["250788000001", "250788000002"]);
    }

    #[test]
    fn test_first_scalar_wins() {
        let xml = r#"<summary>
            <total_transactions>7</total_transactions>
            <total_transactions>99</total_transactions>
        </summary>"#;

        assert_eq!(parse_snapshot(xml).unwrap().total_transactions, 7);
    }

    #[test]
    fn test_nested_markup_in_value() {
        let xml = r#"<summary>
            <total_amount><b>1500</b>.5</total_amount>
            <by_type><type name="payment"><count><b>1</b></count></type></by_type>
            <top_contacts><contact><phone><![CDATA[250788000001]]></phone></contact></top_contacts>
        </summary>"#;

        let snapshot = parse_snapshot(xml).unwrap();
        assert_eq!(snapshot.total_amount, 1500.5);
        assert_eq!(snapshot.type_count("payment"), 1);
        assert_eq!(snapshot.top_contacts[0].phone, "250788000001");
    }

    #[test]
    fn test_wrapped_summary_is_found() {
        let xml = r#"<data generated="2024-07-01">
            <summary>
                <total_transactions>12</total_transactions>
                <hourly_distribution><hour key="09"><count>4</count></hour></hourly_distribution>
            </summary>
        </data>"#;

        let snapshot = parse_snapshot(xml).unwrap();
        assert_eq!(snapshot.total_transactions, 12);
        assert_eq!(snapshot.hour_count(9), 4);
    }

    #[test]
    fn test_unrelated_document_is_empty() {
        let snapshot = parse_snapshot("<report><title>May</title></report>").unwrap();
        assert!(snapshot.is_empty());
    }
}
