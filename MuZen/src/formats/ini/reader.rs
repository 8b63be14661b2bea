//! INI reading

use indexmap::IndexMap;
use std::fs;
use std::path::Path;

use super::SECTION_ATTR;
use super::super::record::{Dataset, DatasetFormat, Record};
use crate::error::Result;

/// Read an INI file from disk
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_ini<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let content = fs::read_to_string(path)?;
    parse_ini(&content)
}

/// Parse INI text into a dataset
///
/// Tolerates `\n` and `\r\n` endings. Lines before the first `[section]`
/// header are discarded; blank lines are separators only and never close a
/// section. A repeated section name restarts that section in place (last
/// occurrence's keys win). Missing sections or keys are not an error; they
/// simply produce fewer records.
pub fn parse_ini(content: &str) -> Result<Dataset> {
    let mut dataset = Dataset::new(DatasetFormat::Ini, "", "", SECTION_ATTR);

    // Merge map keyed by section name, first-occurrence order.
    let mut sections: IndexMap<String, Record> = IndexMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('[') && line.ends_with(']') {
            let name = line[1..line.len() - 1].to_string();
            let mut record = Record::new();
            record.set(SECTION_ATTR, name.clone());
            sections.insert(name.clone(), record);
            current = Some(name);
        } else if let Some(section) = &current {
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                if !key.is_empty() {
                    if let Some(record) = sections.get_mut(section) {
                        record.set(key, value.trim());
                    }
                }
            }
        }
    }

    dataset.records = sections.into_values().collect();
    tracing::debug!(records = dataset.records.len(), "parsed ini document");
    Ok(dataset)
}
