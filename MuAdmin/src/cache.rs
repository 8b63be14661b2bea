//! Draft cache
//!
//! Advisory persistence of unsaved edits, the way the browser editors kept
//! drafts in localStorage. Each draft is a JSON envelope under the platform
//! cache directory. Loading a category ignores drafts entirely; it is up to
//! the UI to offer a stashed draft back to the user, and a draft never
//! outranks what is on disk.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::category::CategoryId;
use crate::error::{Error, Result};

/// One stashed draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    /// Category the draft belongs to.
    pub category: String,
    /// Logical name or entity filename.
    pub file: String,
    /// RFC 3339 stash time.
    pub saved_at: String,
    /// Serialized dataset text.
    pub content: String,
}

/// File-backed draft store.
#[derive(Debug, Clone)]
pub struct DraftCache {
    root: PathBuf,
}

impl DraftCache {
    /// Open the cache at the platform default location.
    ///
    /// # Errors
    /// Fails when the platform reports no cache directory.
    pub fn open() -> Result<Self> {
        let root = dirs::cache_dir()
            .ok_or(Error::CacheDirUnavailable)?
            .join("muadmin")
            .join("drafts");
        Ok(DraftCache { root })
    }

    /// Open the cache at an explicit location.
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        DraftCache { root: root.into() }
    }

    fn path_for(&self, category: CategoryId, file: &str) -> PathBuf {
        let safe: String = file
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.root.join(format!("{category}__{safe}.draft"))
    }

    /// Stash one file's unsaved text.
    ///
    /// # Errors
    /// Fails on I/O or serialization errors.
    pub fn stash(&self, category: CategoryId, file: &str, content: &str) -> Result<()> {
        let draft = Draft {
            category: category.name().to_string(),
            file: file.to_string(),
            saved_at: chrono::Local::now().to_rfc3339(),
            content: content.to_string(),
        };
        fs::create_dir_all(&self.root)?;
        fs::write(
            self.path_for(category, file),
            serde_json::to_string_pretty(&draft)?,
        )?;
        Ok(())
    }

    /// Load a stashed draft, if one exists.
    ///
    /// # Errors
    /// Fails on I/O errors other than the draft being absent.
    pub fn load(&self, category: CategoryId, file: &str) -> Result<Option<Draft>> {
        match fs::read_to_string(self.path_for(category, file)) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Drop a stashed draft. Absent drafts are fine.
    ///
    /// # Errors
    /// Fails on I/O errors other than the draft being absent.
    pub fn discard(&self, category: CategoryId, file: &str) -> Result<()> {
        match fs::remove_file(self.path_for(category, file)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
