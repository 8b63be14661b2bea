//! Grouped XML writing

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::fs;
use std::path::Path;

use super::super::common::finish_xml;
use super::super::record::Dataset;
use crate::error::Result;

/// Write a grouped dataset to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_grouped<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let xml = serialize_grouped(dataset)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize a grouped dataset to an XML string
///
/// Each record becomes one group element with its children nested inside;
/// records without children are written self-closing.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_grouped(dataset: &Dataset) -> Result<String> {
    let mut output = Vec::new();
    output.extend_from_slice(dataset.header.as_bytes());

    let mut writer = Writer::new_with_indent(&mut output, b'\t', 1);
    writer.write_event(Event::Start(BytesStart::new(dataset.root_tag.as_str())))?;

    for record in &dataset.records {
        let mut element = BytesStart::new(dataset.record_tag.as_str());
        for (key, value) in &record.attributes {
            element.push_attribute((key.as_str(), value.as_str()));
        }

        if record.children.is_empty() {
            writer.write_event(Event::Empty(element))?;
            continue;
        }

        writer.write_event(Event::Start(element.borrow()))?;
        for child in &record.children {
            let mut child_element = BytesStart::new(child.tag.as_str());
            for (key, value) in &child.attributes {
                child_element.push_attribute((key.as_str(), value.as_str()));
            }
            writer.write_event(Event::Empty(child_element))?;
        }
        writer.write_event(Event::End(BytesEnd::new(dataset.record_tag.as_str())))?;
    }

    writer.write_event(Event::End(BytesEnd::new(dataset.root_tag.as_str())))?;
    finish_xml(output)
}
