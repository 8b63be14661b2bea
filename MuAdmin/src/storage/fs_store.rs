//! Filesystem-backed storage

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::filename::FilePattern;
use super::{CategoryFiles, ConfigStore};
use crate::category::CategoryId;
use crate::config::AdminConfig;
use crate::error::{Error, Result};

/// Stores category files under the configured data root and keeps
/// timestamped backups under the backup root, one subdirectory per category.
#[derive(Debug, Clone)]
pub struct FsStore {
    config: AdminConfig,
}

impl FsStore {
    /// Create a store over the given configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        FsStore { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.config.data_dir.join(relative)
    }

    fn entity_path(&self, category: CategoryId, filename: &str) -> Result<PathBuf> {
        let dir = category.entity_dir().ok_or_else(|| Error::UnknownFile {
            logical: filename.to_string(),
        })?;
        let pattern = category.entity_pattern().unwrap_or("$^");
        FilePattern::new(pattern)?.validate(filename)?;
        Ok(self.resolve(dir).join(filename))
    }

    fn read_required(&self, path: &Path) -> Result<String> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::FileNotFound {
                path: path.to_path_buf(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Copy the current file into the category's backup directory under a
    /// `<filename>_<timestamp>.bak` name. A failure here is logged and
    /// swallowed: saving matters more than backing up.
    fn create_backup(&self, category: CategoryId, path: &Path) {
        if !path.exists() {
            return;
        }
        let backup_dir = self.config.backup_dir.join(category.name());
        let timestamp = chrono::Local::now().format("%Y-%m-%dT%H-%M-%S");
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let backup_path = backup_dir.join(format!("{file_name}_{timestamp}.bak"));

        let result = fs::create_dir_all(&backup_dir).and_then(|()| fs::copy(path, &backup_path));
        match result {
            Ok(_) => debug!(backup = %backup_path.display(), "created backup"),
            Err(e) => warn!(
                source = %path.display(),
                error = %e,
                "backup failed; continuing with save"
            ),
        }
    }

    fn backed_up_write(&self, category: CategoryId, path: &Path, content: &str) -> Result<()> {
        self.create_backup(category, path);
        fs::write(path, content)?;
        debug!(path = %path.display(), "saved");
        Ok(())
    }
}

impl ConfigStore for FsStore {
    fn read_category(&self, category: CategoryId) -> Result<CategoryFiles> {
        let mut files = IndexMap::new();
        for spec in category.files() {
            let path = self.resolve(spec.path);
            files.insert(spec.logical.to_string(), self.read_required(&path)?);
        }

        let mut entity_files = Vec::new();
        if let (Some(dir), Some(pattern)) = (category.entity_dir(), category.entity_pattern()) {
            let pattern = FilePattern::new(pattern)?;
            for entry in fs::read_dir(self.resolve(dir))? {
                let entry = entry?;
                let name = entry.file_name().to_string_lossy().into_owned();
                if pattern.matches(&name) {
                    entity_files.push(name);
                }
            }
            entity_files.sort();
        }

        Ok(CategoryFiles {
            files,
            entity_files,
        })
    }

    fn read_entity(&self, category: CategoryId, filename: &str) -> Result<String> {
        let path = self.entity_path(category, filename)?;
        self.read_required(&path)
    }

    fn write_file(&self, category: CategoryId, logical: &str, content: &str) -> Result<()> {
        let spec = category.file(logical).ok_or_else(|| Error::UnknownFile {
            logical: logical.to_string(),
        })?;
        let path = self.resolve(spec.path);
        self.backed_up_write(category, &path, content)
    }

    fn write_entity(&self, category: CategoryId, filename: &str, content: &str) -> Result<()> {
        let path = self.entity_path(category, filename)?;
        self.backed_up_write(category, &path, content)
    }
}
