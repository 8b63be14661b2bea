//! MuAdmin - server-side core of the MU Online admin suite
//!
//! Sits between the browser editors and the game server's data files. The
//! editors see raw text and record tables; this crate owns the category
//! registry, the per-category editing sessions, the filesystem store with
//! timestamped backups, and the advisory draft cache. File parsing and
//! regeneration live in the [`muzen`] engine crate.

// Re-export muzen
pub use muzen;

pub mod cache;
pub mod category;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;

pub use error::{Error, Result};

use category::CategoryId;
use config::AdminConfig;
use session::Session;
use storage::FsStore;

/// Main suite interface: one per server installation.
pub struct AdminSuite {
    config: AdminConfig,
}

impl AdminSuite {
    /// Create a suite over the given configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        Self { config }
    }

    /// Load configuration from `muadmin.toml` and create the suite.
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(AdminConfig::load(path)?))
    }

    /// Open and load an editing session for one category.
    pub fn open(&self, category: CategoryId) -> Result<Session<FsStore>> {
        let mut session = Session::new(category, FsStore::new(self.config.clone()));
        session.load()?;
        Ok(session)
    }

    /// Create a session without loading it (the caller drives `load`).
    #[must_use]
    pub fn session(&self, category: CategoryId) -> Session<FsStore> {
        Session::new(category, FsStore::new(self.config.clone()))
    }
}
