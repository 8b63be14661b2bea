//! Flat XML reading

use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs;
use std::path::Path;

use super::super::common::{collect_attributes, split_header};
use super::super::record::{Dataset, DatasetFormat, Record};
use crate::error::{Error, Result};

/// Read a flat XML file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or has invalid XML.
pub fn read_flat<P: AsRef<Path>>(path: P, record_tag: &str) -> Result<Dataset> {
    let content = fs::read_to_string(path)?;
    parse_flat(&content, record_tag)
}

/// Parse flat XML from a string
///
/// Every element matching `record_tag`, at any depth under the root, becomes
/// one record carrying all of its attributes in document order.
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_flat(content: &str, record_tag: &str) -> Result<Dataset> {
    let (header, root_tag) = split_header(content)?;
    let mut dataset = Dataset::new(DatasetFormat::XmlFlat, header, root_tag, record_tag);

    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                if e.name().as_ref() == record_tag.as_bytes() {
                    dataset.records.push(Record {
                        attributes: collect_attributes(&e)?,
                        ..Record::default()
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(
        root = %dataset.root_tag,
        records = dataset.records.len(),
        "parsed flat document"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Events>
	<Event id="1" name="A" start_time="10:00" duration="5" enabled="true" />
	<Event id="2" name="B" enabled="false" Custom="x" />
</Events>
"#;

    #[test]
    fn test_parse_flat_records() {
        let dataset = parse_flat(EVENTS, "Event").unwrap();
        assert_eq!(dataset.root_tag, "Events");
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].get("name"), Some("A"));
        // Unknown attributes survive with no dedicated field.
        assert_eq!(dataset.records[1].get("Custom"), Some("x"));
    }

    #[test]
    fn test_parse_flat_attribute_order() {
        let dataset = parse_flat(EVENTS, "Event").unwrap();
        let keys: Vec<&str> = dataset.records[0]
            .attributes
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["id", "name", "start_time", "duration", "enabled"]);
    }

    #[test]
    fn test_parse_flat_any_depth() {
        let nested = r#"<Root><Wrap><Event id="9" /></Wrap></Root>"#;
        let dataset = parse_flat(nested, "Event").unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].get("id"), Some("9"));
    }

    #[test]
    fn test_parse_flat_unescapes_values() {
        let xml = r#"<Events><Event name="Bo &amp; Co &lt;3" /></Events>"#;
        let dataset = parse_flat(xml, "Event").unwrap();
        assert_eq!(dataset.records[0].get("name"), Some("Bo & Co <3"));
    }

    #[test]
    fn test_parse_flat_malformed_fails() {
        assert!(parse_flat("<Events><Event id=\"1\"></Events>", "Event").is_err());
    }
}
