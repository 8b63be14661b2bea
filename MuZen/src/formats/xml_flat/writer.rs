//! Flat XML writing

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::fs;
use std::path::Path;

use super::super::common::finish_xml;
use super::super::record::Dataset;
use crate::error::Result;

/// Write a flat dataset to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_flat<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let xml = serialize_flat(dataset)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize a flat dataset to an XML string
///
/// The captured header is re-emitted verbatim ahead of the root element;
/// attributes keep their record order. Output is deterministic: the same
/// dataset always yields identical bytes.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_flat(dataset: &Dataset) -> Result<String> {
    let mut output = Vec::new();
    output.extend_from_slice(dataset.header.as_bytes());

    let mut writer = Writer::new_with_indent(&mut output, b'\t', 1);
    writer.write_event(Event::Start(BytesStart::new(dataset.root_tag.as_str())))?;

    for record in &dataset.records {
        let mut element = BytesStart::new(dataset.record_tag.as_str());
        for (key, value) in &record.attributes {
            element.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new(dataset.root_tag.as_str())))?;
    finish_xml(output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::reader::parse_flat;
    use super::*;

    const EVENTS: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Events>\n\t<Event id=\"1\" name=\"A\" enabled=\"true\" />\n\t<Event id=\"2\" name=\"B\" enabled=\"false\" />\n</Events>\n";

    #[test]
    fn test_serialize_flat_round_trip() {
        let dataset = parse_flat(EVENTS, "Event").unwrap();
        let regenerated = serialize_flat(&dataset).unwrap();
        assert_eq!(regenerated, EVENTS);
        // Structural idempotence
        assert_eq!(parse_flat(&regenerated, "Event").unwrap(), dataset);
    }

    #[test]
    fn test_serialize_flat_deterministic() {
        let dataset = parse_flat(EVENTS, "Event").unwrap();
        assert_eq!(
            serialize_flat(&dataset).unwrap(),
            serialize_flat(&dataset).unwrap()
        );
    }

    #[test]
    fn test_serialize_flat_escapes_values() {
        let mut dataset = parse_flat("<Events></Events>", "Event").unwrap();
        let mut record = crate::formats::Record::new();
        record.set("name", "Bo & Co <3 \"x\"");
        dataset.records.push(record);

        let xml = serialize_flat(&dataset).unwrap();
        assert!(xml.contains("name=\"Bo &amp; Co &lt;3 &quot;x&quot;\""));

        let reparsed = parse_flat(&xml, "Event").unwrap();
        assert_eq!(reparsed.records[0].get("name"), Some("Bo & Co <3 \"x\""));
    }

    #[test]
    fn test_serialize_flat_keeps_header_comments() {
        let source = "<?xml version=\"1.0\"?>\n<!-- keep me -->\n<Events>\n\t<Event id=\"1\" />\n</Events>\n";
        let dataset = parse_flat(source, "Event").unwrap();
        assert_eq!(serialize_flat(&dataset).unwrap(), source);
    }
}
