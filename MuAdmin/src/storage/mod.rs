//! Storage collaborator
//!
//! The editors only ever see raw file text going in and coming back out;
//! everything about where files live, how they are listed, and how backups
//! happen sits behind [`ConfigStore`]. The filesystem implementation is
//! [`FsStore`].

mod filename;
mod fs_store;

pub use filename::FilePattern;
pub use fs_store::FsStore;

use indexmap::IndexMap;

use crate::category::CategoryId;
use crate::error::Result;

/// Everything a category editor needs to start: raw text per logical file
/// plus the per-entity filenames available for on-demand loading.
#[derive(Debug, Clone, Default)]
pub struct CategoryFiles {
    /// Raw text keyed by logical name, in registry order.
    pub files: IndexMap<String, String>,
    /// Filenames matching the category's entity pattern, sorted.
    pub entity_files: Vec<String>,
}

/// Storage contract for one game-server installation.
pub trait ConfigStore {
    /// Read every file of a category plus its entity-file listing.
    ///
    /// # Errors
    /// Fails if a required file is absent or unreadable.
    fn read_category(&self, category: CategoryId) -> Result<CategoryFiles>;

    /// Read one per-entity file. The filename is validated against the
    /// category's pattern before any path is built.
    ///
    /// # Errors
    /// Fails on pattern mismatch or if the file is absent.
    fn read_entity(&self, category: CategoryId, filename: &str) -> Result<String>;

    /// Overwrite one category file, taking a timestamped backup first.
    /// Backup failure is logged and never aborts the write.
    ///
    /// # Errors
    /// Fails if the logical name is unknown or the write itself fails.
    fn write_file(&self, category: CategoryId, logical: &str, content: &str) -> Result<()>;

    /// Overwrite one per-entity file, with validation and backup as above.
    ///
    /// # Errors
    /// Fails on pattern mismatch or if the write itself fails.
    fn write_entity(&self, category: CategoryId, filename: &str, content: &str) -> Result<()>;
}
