//! Core types for dataset diffing
//!

use std::fmt;

/// Type of change detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    /// Record was added
    Added,
    /// Record was removed
    Removed,
    /// Record was modified
    Modified,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "+"),
            Self::Removed => write!(f, "-"),
            Self::Modified => write!(f, "~"),
        }
    }
}

/// A change to one attribute
#[derive(Debug, Clone)]
pub struct AttributeChange {
    /// Attribute key
    pub key: String,
    /// Previous value, if any
    pub old: Option<String>,
    /// New value, if any
    pub new: Option<String>,
}

impl fmt::Display for AttributeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.old, &self.new) {
            (Some(old), Some(new)) => write!(f, "{}: \"{old}\" -> \"{new}\"", self.key),
            (None, Some(new)) => write!(f, "{}: added \"{new}\"", self.key),
            (Some(old), None) => write!(f, "{}: removed (was \"{old}\")", self.key),
            (None, None) => write!(f, "{}", self.key),
        }
    }
}

/// A change to one record
#[derive(Debug, Clone)]
pub struct RecordChange {
    /// Record position in the newer dataset (or the older one for removals)
    pub position: usize,
    /// Value of the record's first attribute, for human-readable output
    pub label: String,
    /// What happened to the record
    pub change_type: ChangeType,
    /// Attribute-level changes (modified records only)
    pub attributes: Vec<AttributeChange>,
    /// True when nested structure (children, groups) differs
    pub nested: bool,
}

impl fmt::Display for RecordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} record {} [{}]", self.change_type, self.position, self.label)?;
        for change in &self.attributes {
            write!(f, "\n    {change}")?;
        }
        if self.nested {
            write!(f, "\n    nested structure differs")?;
        }
        Ok(())
    }
}

/// Result of diffing two datasets
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Per-record changes in position order
    pub changes: Vec<RecordChange>,
}

impl DiffResult {
    /// True if the datasets are structurally identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changed records.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let added = self.count(ChangeType::Added);
        let removed = self.count(ChangeType::Removed);
        let modified = self.count(ChangeType::Modified);
        format!("{added} added, {removed} removed, {modified} modified")
    }

    fn count(&self, change_type: ChangeType) -> usize {
        self.changes
            .iter()
            .filter(|c| c.change_type == change_type)
            .count()
    }
}
