//! Dataset diffing
//!
//! Positional record-level comparison used by the CLI `diff` command and by
//! save summaries. Records are matched by position; attribute changes are
//! reported key by key, nested structure (children, groups, rates) as a
//! single marker.

mod types;

pub use types::{AttributeChange, ChangeType, DiffResult, RecordChange};

use crate::formats::{Dataset, Record};

/// Diff two datasets
#[must_use]
pub fn diff_datasets(old: &Dataset, new: &Dataset) -> DiffResult {
    let mut result = DiffResult::default();
    let common = old.records.len().min(new.records.len());

    for position in 0..common {
        let old_record = &old.records[position];
        let new_record = &new.records[position];
        if old_record == new_record {
            continue;
        }
        result.changes.push(RecordChange {
            position,
            label: record_label(new_record),
            change_type: ChangeType::Modified,
            attributes: diff_attributes(old_record, new_record),
            nested: old_record.children != new_record.children
                || old_record.groups != new_record.groups,
        });
    }

    for position in common..old.records.len() {
        result.changes.push(RecordChange {
            position,
            label: record_label(&old.records[position]),
            change_type: ChangeType::Removed,
            attributes: Vec::new(),
            nested: false,
        });
    }

    for position in common..new.records.len() {
        result.changes.push(RecordChange {
            position,
            label: record_label(&new.records[position]),
            change_type: ChangeType::Added,
            attributes: Vec::new(),
            nested: false,
        });
    }

    result
}

fn record_label(record: &Record) -> String {
    record
        .attributes
        .values()
        .next()
        .cloned()
        .unwrap_or_default()
}

fn diff_attributes(old: &Record, new: &Record) -> Vec<AttributeChange> {
    let mut changes = Vec::new();

    for (key, new_value) in &new.attributes {
        match old.attributes.get(key) {
            Some(old_value) if old_value == new_value => {}
            Some(old_value) => changes.push(AttributeChange {
                key: key.clone(),
                old: Some(old_value.clone()),
                new: Some(new_value.clone()),
            }),
            None => changes.push(AttributeChange {
                key: key.clone(),
                old: None,
                new: Some(new_value.clone()),
            }),
        }
    }

    for (key, old_value) in &old.attributes {
        if !new.attributes.contains_key(key) {
            changes.push(AttributeChange {
                key: key.clone(),
                old: Some(old_value.clone()),
                new: None,
            });
        }
    }

    if old.rates != new.rates {
        changes.push(AttributeChange {
            key: crate::formats::schema::RATE_FAMILY.to_string(),
            old: Some(old.rates.join(",")),
            new: Some(new.rates.join(",")),
        });
    }

    changes
}
