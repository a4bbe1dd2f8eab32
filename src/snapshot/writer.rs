//! Snapshot document writer
//!
//! Serializes an [`AggregateSnapshot`] into the same XML shape the parser
//! reads, under a `<summary>` root.

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use super::error::SnapshotResult;
use super::types::AggregateSnapshot;

/// Serialize a snapshot to an indented XML document
pub fn write_snapshot(snapshot: &AggregateSnapshot) -> SnapshotResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("summary")
        .write_inner_content(|w| {
            text_element(w, "total_transactions", &snapshot.total_transactions.to_string())?;
            text_element(w, "total_amount", &snapshot.total_amount.to_string())?;
            text_element(w, "total_fees", &snapshot.total_fees.to_string())?;

            w.create_element("by_type").write_inner_content(|w| {
                for (name, summary) in &snapshot.by_type {
                    w.create_element("type")
                        .with_attribute(("name", name.as_str()))
                        .write_inner_content(|w| {
                            text_element(w, "count", &summary.count.to_string())?;
                            text_element(w, "amount", &summary.amount.to_string())?;
                            text_element(w, "fees", &summary.fees.to_string())?;
                            Ok::<(), quick_xml::Error>(())
                        })?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;

            w.create_element("monthly_totals").write_inner_content(|w| {
                for (key, month) in &snapshot.monthly_totals {
                    w.create_element("month")
                        .with_attribute(("key", key.as_str()))
                        .write_inner_content(|w| {
                            text_element(w, "amount", &month.amount.to_string())?;
                            text_element(w, "count", &month.count.to_string())?;
                            text_element(w, "fees", &month.fees.to_string())?;
                            Ok::<(), quick_xml::Error>(())
                        })?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;

            w.create_element("hourly_distribution").write_inner_content(|w| {
                for (hour, count) in &snapshot.hourly_distribution {
                    let key = format!("{:02}", hour);
                    w.create_element("hour")
                        .with_attribute(("key", key.as_str()))
                        .write_inner_content(|w| {
                            text_element(w, "count", &count.to_string())?;
                            Ok::<(), quick_xml::Error>(())
                        })?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;

            w.create_element("top_contacts").write_inner_content(|w| {
                for contact in &snapshot.top_contacts {
                    w.create_element("contact").write_inner_content(|w| {
                        text_element(w, "phone", &contact.phone)?;
                        text_element(w, "count", &contact.count.to_string())?;
                        text_element(w, "amount", &contact.amount.to_string())?;
                        Ok::<(), quick_xml::Error>(())
                    })?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;

            Ok::<(), quick_xml::Error>(())
        })?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> quick_xml::Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}
