//! Admin suite configuration (muadmin.toml)
//!
//! Points the storage layer at the game server's data tree and the backup
//! directory. Paths inside categories are fixed by the registry; only the
//! roots move between installs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

fn default_data_dir() -> PathBuf {
    PathBuf::from("Data")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("backups")
}

/// The full admin configuration (muadmin.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Root of the server's data tree (contains Monster/, Event/, Mix/, ...).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Where timestamped backups land, one subdirectory per category.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backup_dir: default_backup_dir(),
        }
    }
}

impl AdminConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Configuration rooted at an explicit data directory, with backups
    /// beside it.
    #[must_use]
    pub fn rooted_at<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let backup_dir = data_dir.join("backups");
        Self {
            data_dir,
            backup_dir,
        }
    }
}
