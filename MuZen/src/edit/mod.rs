//! Editing operations on datasets
//!
//! `DatasetEditor` owns one dataset plus its undo history. Every mutating
//! operation pushes exactly one snapshot before touching the dataset and
//! flags the affected record for UI highlighting. Operations that receive a
//! stale record/child index are silent no-ops (`false`), tolerating UI state
//! that lags behind the data; only an out-of-range rate-family index is an
//! error, because growing the family requires an explicit `add_rate`.

mod history;

pub use history::{DEFAULT_UNDO_DEPTH, EditHistory};

use crate::error::{Error, Result};
use crate::formats::schema::default_rule;
use crate::formats::{ChildRecord, Dataset, Group, Record};

/// A dataset under edit, with undo.
#[derive(Debug, Clone)]
pub struct DatasetEditor {
    dataset: Dataset,
    history: EditHistory,
}

impl DatasetEditor {
    /// Wrap a freshly parsed dataset.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        DatasetEditor {
            dataset,
            history: EditHistory::default(),
        }
    }

    /// The current dataset.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Consume the editor, returning the dataset.
    #[must_use]
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// True if any record carries unsaved edits.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.dataset.is_modified()
    }

    /// Number of undo steps available.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    fn snapshot(&mut self) {
        self.history.push(self.dataset.clone());
    }

    // ==================== scalar attributes ====================

    /// Set a scalar attribute on a record. Free-form extra keys are allowed;
    /// values are stored as strings even when numeric.
    ///
    /// Returns `false` (no-op) when the record index is stale.
    pub fn update_scalar(
        &mut self,
        record: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        if record >= self.dataset.records.len() {
            return false;
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        rec.set(key, value);
        rec.modified = true;
        true
    }

    // ==================== rate family ====================

    /// Set an existing rate-family value.
    ///
    /// # Errors
    /// Returns an error when `rate` is outside the family's current length;
    /// growing the family requires [`DatasetEditor::add_rate`].
    pub fn update_rate(&mut self, record: usize, rate: usize, value: impl Into<String>) -> Result<bool> {
        if record >= self.dataset.records.len() {
            return Ok(false);
        }
        let len = self.dataset.records[record].rates.len();
        if rate >= len {
            return Err(Error::RateIndexOutOfRange { index: rate, len });
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        rec.rates[rate] = value.into();
        rec.modified = true;
        Ok(true)
    }

    /// Append a value to the rate family.
    pub fn add_rate(&mut self, record: usize, value: impl Into<String>) -> bool {
        if record >= self.dataset.records.len() {
            return false;
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        rec.rates.push(value.into());
        rec.modified = true;
        true
    }

    // ==================== children ====================

    /// Append a child element to a grouped record.
    pub fn add_child(&mut self, record: usize, child: ChildRecord) -> bool {
        if record >= self.dataset.records.len() {
            return false;
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        rec.children.push(child);
        rec.modified = true;
        true
    }

    /// Remove a child element. Stale indices are a no-op.
    pub fn remove_child(&mut self, record: usize, child: usize) -> bool {
        let Some(rec) = self.dataset.records.get(record) else {
            return false;
        };
        if child >= rec.children.len() {
            return false;
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        rec.children.remove(child);
        rec.modified = true;
        true
    }

    // ==================== requirement groups ====================

    /// Add a requirement group to a recipe record, seeded with one default
    /// item-rule. The new index is max(existing numeric indices) + 1, or 1
    /// when the record has none.
    ///
    /// Returns the allocated index value, or `None` for a stale record.
    pub fn add_group(&mut self, record: usize) -> Option<String> {
        if record >= self.dataset.records.len() {
            return None;
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        let next = rec
            .groups
            .iter()
            .filter_map(|g| g.index.parse::<i64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        let index = next.to_string();
        let mut group = Group::new(index.clone());
        group.rules.push(default_rule());
        rec.groups.push(group);
        rec.modified = true;
        Some(index)
    }

    /// Remove the last requirement group by array position, not by index
    /// value. Asymmetric with [`DatasetEditor::add_group`]; kept as the only
    /// group removal the editor offers.
    pub fn remove_group(&mut self, record: usize) -> bool {
        let Some(rec) = self.dataset.records.get(record) else {
            return false;
        };
        if rec.groups.is_empty() {
            return false;
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        rec.groups.pop();
        rec.modified = true;
        true
    }

    // ==================== item-rules ====================

    /// Append a default item-rule to a group.
    pub fn add_rule(&mut self, record: usize, group: usize) -> bool {
        let Some(rec) = self.dataset.records.get(record) else {
            return false;
        };
        if group >= rec.groups.len() {
            return false;
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        rec.groups[group].rules.push(default_rule());
        rec.modified = true;
        true
    }

    /// Remove an item-rule from a group. Stale indices are a no-op.
    pub fn remove_rule(&mut self, record: usize, group: usize, rule: usize) -> bool {
        let Some(rec) = self.dataset.records.get(record) else {
            return false;
        };
        let Some(grp) = rec.groups.get(group) else {
            return false;
        };
        if rule >= grp.rules.len() {
            return false;
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        rec.groups[group].rules.remove(rule);
        rec.modified = true;
        true
    }

    /// Set an attribute on an item-rule.
    pub fn update_rule(
        &mut self,
        record: usize,
        group: usize,
        rule: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        let Some(rec) = self.dataset.records.get(record) else {
            return false;
        };
        if rec
            .groups
            .get(group)
            .and_then(|g| g.rules.get(rule))
            .is_none()
        {
            return false;
        }
        self.snapshot();
        let rec = &mut self.dataset.records[record];
        rec.groups[group].rules[rule].set(key, value);
        rec.modified = true;
        true
    }

    // ==================== whole records ====================

    /// Append a new record, returning its index.
    pub fn add_record(&mut self, mut record: Record) -> usize {
        self.snapshot();
        record.modified = true;
        self.dataset.records.push(record);
        self.dataset.records.len() - 1
    }

    /// Remove a set of records by index. Stale indices are skipped; returns
    /// the number actually removed.
    pub fn remove_records(&mut self, indices: &[usize]) -> usize {
        let mut valid: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.dataset.records.len())
            .collect();
        valid.sort_unstable();
        valid.dedup();
        if valid.is_empty() {
            return 0;
        }
        self.snapshot();
        // Highest first so earlier removals don't shift later targets.
        for &index in valid.iter().rev() {
            self.dataset.records.remove(index);
        }
        valid.len()
    }

    // ==================== undo / save ====================

    /// Restore the dataset to the state before the last mutation.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.history.pop() {
            self.dataset = snapshot;
            true
        } else {
            false
        }
    }

    /// Called after a successful save: clears the modified highlights and
    /// the undo history.
    pub fn mark_saved(&mut self) {
        self.dataset.clear_modified();
        self.history.clear();
    }
}
