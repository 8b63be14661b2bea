//! INI writing

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::SECTION_ATTR;
use super::super::record::Dataset;
use crate::error::Result;

/// Write an INI dataset to disk
///
/// # Errors
/// Returns an error if file writing fails.
pub fn write_ini<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let text = serialize_ini(dataset)?;
    fs::write(path, text)?;
    Ok(())
}

/// Serialize an INI dataset to text
///
/// One `[section]` header per record, `key=value` lines in insertion order,
/// one blank separator line after each section, `\n` endings throughout.
pub fn serialize_ini(dataset: &Dataset) -> Result<String> {
    let mut output = String::new();
    for record in &dataset.records {
        let section = record.get(SECTION_ATTR).unwrap_or_default();
        let _ = writeln!(output, "[{section}]");
        for (key, value) in &record.attributes {
            if key != SECTION_ATTR {
                let _ = writeln!(output, "{key}={value}");
            }
        }
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::reader::parse_ini;
    use super::*;

    #[test]
    fn test_serialize_ini_layout() {
        let dataset = parse_ini("[Common]\nEventTime=60\n\n[Golden]\nStartHour=10\n").unwrap();
        let text = serialize_ini(&dataset).unwrap();
        assert_eq!(text, "[Common]\nEventTime=60\n\n[Golden]\nStartHour=10\n\n");
    }

    #[test]
    fn test_serialize_ini_round_trip_idempotent() {
        let dataset = parse_ini("[Common]\r\nEventTime=60\r\nNotice=1\r\n").unwrap();
        let text = serialize_ini(&dataset).unwrap();
        let reparsed = parse_ini(&text).unwrap();
        assert_eq!(reparsed, dataset);
        // And a second pass is byte-identical.
        assert_eq!(serialize_ini(&reparsed).unwrap(), text);
    }
}
