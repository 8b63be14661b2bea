//! Grouped XML reading

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs;
use std::path::Path;

use super::super::common::{collect_attributes, split_header};
use super::super::record::{ChildRecord, Dataset, DatasetFormat, Record};
use super::super::schema::GROUP_INDEX_ATTR;
use crate::error::{Error, Result};

/// Read a grouped XML file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or has invalid XML.
pub fn read_grouped<P: AsRef<Path>>(
    path: P,
    record_tag: &str,
    child_tag: Option<&str>,
) -> Result<Dataset> {
    let content = fs::read_to_string(path)?;
    parse_grouped(&content, record_tag, child_tag)
}

/// Parse grouped XML from a string
///
/// Elements matching `record_tag` are merged by their `Index` attribute: the
/// first occurrence's attributes win, children from every occurrence append
/// in document order. With `child_tag` set, only matching descendants are
/// captured (at any depth inside the group element); without it, every
/// direct child element is captured.
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_grouped(content: &str, record_tag: &str, child_tag: Option<&str>) -> Result<Dataset> {
    let (header, root_tag) = split_header(content)?;
    let mut dataset = Dataset::new(DatasetFormat::XmlGrouped, header, root_tag, record_tag);

    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    // Merge map keyed by index value, first-occurrence order.
    let mut merged: IndexMap<String, Record> = IndexMap::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    // (index value, element depth) of the group currently open
    let mut open_group: Option<(String, usize)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                if let Some((index, group_depth)) = open_group.clone() {
                    if capture_child(&e, depth, group_depth, child_tag) {
                        push_child(&mut merged, &index, &e)?;
                    }
                } else if e.name().as_ref() == record_tag.as_bytes() {
                    let index = enter_group(&mut merged, &e)?;
                    open_group = Some((index, depth));
                }
            }
            Ok(Event::Empty(e)) => {
                let elem_depth = depth + 1;
                if let Some((index, group_depth)) = open_group.clone() {
                    if capture_child(&e, elem_depth, group_depth, child_tag) {
                        push_child(&mut merged, &index, &e)?;
                    }
                } else if e.name().as_ref() == record_tag.as_bytes() {
                    enter_group(&mut merged, &e)?;
                }
            }
            Ok(Event::End(e)) => {
                let closes_group = matches!(&open_group, Some((_, group_depth))
                    if depth == *group_depth && e.name().as_ref() == record_tag.as_bytes());
                if closes_group {
                    open_group = None;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    dataset.records = merged.into_values().collect();
    tracing::debug!(
        root = %dataset.root_tag,
        records = dataset.records.len(),
        "parsed grouped document"
    );
    Ok(dataset)
}

fn capture_child(
    e: &quick_xml::events::BytesStart<'_>,
    elem_depth: usize,
    group_depth: usize,
    child_tag: Option<&str>,
) -> bool {
    match child_tag {
        Some(tag) => e.name().as_ref() == tag.as_bytes(),
        None => elem_depth == group_depth + 1,
    }
}

fn enter_group(
    merged: &mut IndexMap<String, Record>,
    e: &quick_xml::events::BytesStart<'_>,
) -> Result<String> {
    let attributes = collect_attributes(e)?;
    let index = attributes
        .get(GROUP_INDEX_ATTR)
        .cloned()
        .unwrap_or_default();
    merged.entry(index.clone()).or_insert_with(|| Record {
        attributes,
        ..Record::default()
    });
    Ok(index)
}

fn push_child(
    merged: &mut IndexMap<String, Record>,
    index: &str,
    e: &quick_xml::events::BytesStart<'_>,
) -> Result<()> {
    let child = ChildRecord {
        tag: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        attributes: collect_attributes(e)?,
    };
    if let Some(record) = merged.get_mut(index) {
        record.children.push(child);
    }
    Ok(())
}
