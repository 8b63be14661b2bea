//! File format handlers for MU game-server config tables

pub mod common;
pub mod ini;
pub mod record;
pub mod recipe;
pub mod schema;
pub mod xml_flat;
pub mod xml_grouped;

// Re-export main document types
pub use record::{ChildRecord, Dataset, DatasetFormat, Group, Record};

pub use ini::{parse_ini, serialize_ini};
pub use recipe::{parse_recipe, serialize_recipe};
pub use xml_flat::{parse_flat, serialize_flat};
pub use xml_grouped::{parse_grouped, serialize_grouped};

use crate::error::Result;

/// Serialize a dataset with the writer matching its format.
///
/// Deterministic: the same dataset always yields identical bytes, which is
/// what lets callers compare regenerated text against the original to skip
/// no-op saves.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn serialize(dataset: &Dataset) -> Result<String> {
    match dataset.format {
        DatasetFormat::XmlFlat => serialize_flat(dataset),
        DatasetFormat::XmlGrouped => serialize_grouped(dataset),
        DatasetFormat::Recipe => serialize_recipe(dataset),
        DatasetFormat::Ini => serialize_ini(dataset),
    }
}
