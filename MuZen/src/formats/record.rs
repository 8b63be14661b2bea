//! Normalized record/dataset structures
//!
//!

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Source format of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetFormat {
    /// Flat records: one element per record, attributes only.
    XmlFlat,
    /// Grouped records keyed by an index attribute, with child elements.
    XmlGrouped,
    /// Recipe trees: record → group → item-rule.
    Recipe,
    /// Line-oriented `[section]` / `key=value` files.
    Ini,
}

/// One configuration entry: an ordered attribute bag plus optional
/// nested structure (children for grouped files, groups for recipes).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    /// Attributes in document order. Insertion order is serialization order.
    pub attributes: IndexMap<String, String>,
    /// Values of the variable-cardinality rate family, in sequence order.
    /// Empty for records that carry no family.
    pub rates: Vec<String>,
    /// Child elements (grouped formats only).
    pub children: Vec<ChildRecord>,
    /// Requirement groups (recipe format only).
    pub groups: Vec<Group>,
    /// UI highlight flag; not part of the record's identity.
    #[serde(skip)]
    pub modified: bool,
}

/// A nested child element captured under a grouped record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    /// Element tag name.
    pub tag: String,
    /// Attributes in document order.
    pub attributes: IndexMap<String, String>,
}

/// A requirement group inside a recipe record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// The group's `Index` attribute, kept as written.
    pub index: String,
    /// Item-rule records inside the group.
    pub rules: Vec<Record>,
}

/// The full parsed contents of one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Source format; fixed for the dataset's lifetime.
    pub format: DatasetFormat,
    /// Verbatim preamble (prolog, comments) re-emitted before the root tag.
    pub header: String,
    /// Root element tag name.
    pub root_tag: String,
    /// Record element tag name (synthetic `Section` marker for INI).
    pub record_tag: String,
    /// Records in document order.
    pub records: Vec<Record>,
}

// `modified` is a transient highlight flag; two records that differ only in
// it are the same record.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes
            && self.rates == other.rates
            && self.children == other.children
            && self.groups == other.groups
    }
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record from an ordered attribute list.
    #[must_use]
    pub fn with_attributes<I, K, V>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Record {
            attributes: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Set an attribute value, appending the key if it is new.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }
}

impl ChildRecord {
    /// Creates a child record with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        ChildRecord {
            tag: tag.into(),
            attributes: IndexMap::new(),
        }
    }
}

impl Group {
    /// Creates an empty group with the given index value.
    #[must_use]
    pub fn new(index: impl Into<String>) -> Self {
        Group {
            index: index.into(),
            rules: Vec::new(),
        }
    }
}

impl Dataset {
    /// Creates an empty dataset for the given format and tag names.
    #[must_use]
    pub fn new(
        format: DatasetFormat,
        header: impl Into<String>,
        root_tag: impl Into<String>,
        record_tag: impl Into<String>,
    ) -> Self {
        Dataset {
            format,
            header: header.into(),
            root_tag: root_tag.into(),
            record_tag: record_tag.into(),
            records: Vec::new(),
        }
    }

    /// Union of every attribute key seen across all records, in first-seen
    /// order. This is what an editor presents as columns; individual records
    /// still keep only their own attributes on save.
    #[must_use]
    pub fn attribute_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for record in &self.records {
            for key in record.attributes.keys() {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// True if any record carries the modified highlight flag.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.records.iter().any(|r| r.modified)
    }

    /// Clear every record's modified flag.
    pub fn clear_modified(&mut self) {
        for record in &mut self.records {
            record.modified = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modified_flag_ignored_by_eq() {
        let mut a = Record::with_attributes([("Index", "1"), ("Name", "Golden")]);
        let b = a.clone();
        a.modified = true;
        assert_eq!(a, b);
    }

    #[test]
    fn test_attribute_keys_union() {
        let mut dataset = Dataset::new(DatasetFormat::XmlFlat, "", "Events", "Event");
        dataset
            .records
            .push(Record::with_attributes([("id", "1"), ("name", "A")]));
        dataset
            .records
            .push(Record::with_attributes([("id", "2"), ("enabled", "true")]));
        assert_eq!(dataset.attribute_keys(), vec!["id", "name", "enabled"]);
    }

    #[test]
    fn test_attribute_order_preserved() {
        let record = Record::with_attributes([("b", "2"), ("a", "1"), ("c", "3")]);
        let keys: Vec<&String> = record.attributes.keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }
}
