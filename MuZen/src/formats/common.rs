//! Helpers shared by the XML readers and writers

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// Prolog substituted when a source file carries no preamble of its own.
pub const DEFAULT_XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Locate the root element and capture the verbatim preamble before it.
///
/// Returns `(header, root_tag)`. The header is everything up to the root
/// element's `<`, preserved byte-for-byte so saves regenerate it unchanged.
///
/// # Errors
/// Returns an error if the document has no root element.
pub fn split_header(raw: &str) -> Result<(String, String)> {
    let mut reader = Reader::from_str(raw);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                let root_tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                // buffer_position is past the open tag; backtrack to its '<'
                // so comments mentioning the tag earlier cannot confuse us.
                let end = reader.buffer_position();
                let open = format!("<{root_tag}");
                let header = raw[..end]
                    .rfind(&open)
                    .map_or_else(|| DEFAULT_XML_HEADER.to_string(), |at| raw[..at].to_string());
                return Ok((header, root_tag));
            }
            Ok(Event::Eof) => return Err(Error::MissingRootElement),
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }
}

/// Collect every attribute of an element in document order, unescaped.
///
/// # Errors
/// Returns an error on malformed attribute syntax or invalid entities.
pub fn collect_attributes(e: &BytesStart<'_>) -> Result<IndexMap<String, String>> {
    let mut attributes = IndexMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

/// Finalize a quick-xml output buffer into the on-disk text shape.
///
/// # Errors
/// Returns an error if the buffer is not valid UTF-8.
pub fn finish_xml(output: Vec<u8>) -> Result<String> {
    let xml = String::from_utf8(output)?;
    // Space before self-closing tags, matching the game server's own files
    let mut xml = xml.replace("/>", " />");
    if !xml.ends_with('\n') {
        xml.push('\n');
    }
    Ok(xml)
}
