//! Editing sessions
//!
//! One session owns one category's datasets. The lifecycle is
//! `Unloaded → Loading → Ready → Saving → Ready`, with `LoadFailed` terminal
//! until an explicit [`Session::load`] retry. A failed save keeps the
//! session `Ready` with every in-memory edit and the undo history intact, so
//! no work is lost; the failure surfaces as a status message, never as a
//! silently empty editor.
//!
//! Saves serialize the current dataset and compare it against the text the
//! file had when it was loaded (or last saved). Identical text short-circuits:
//! no write, no backup.

use indexmap::IndexMap;
use tracing::info;

use muzen::diff::{DiffResult, diff_datasets};
use muzen::edit::DatasetEditor;
use muzen::formats::{self, Dataset};

use crate::category::{CategoryId, ParseMode};
use crate::error::{Error, Result};
use crate::storage::ConfigStore;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing loaded yet.
    Unloaded,
    /// Fetching and parsing category files.
    Loading,
    /// Datasets available for editing.
    Ready,
    /// A save is in flight.
    Saving,
    /// Load failed; editing blocked until a retry succeeds.
    LoadFailed,
}

/// What a save actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New content written (and the previous file backed up).
    Saved,
    /// Regenerated text matched the baseline; nothing touched disk.
    Unchanged,
}

/// One category's editing session.
pub struct Session<S> {
    category: CategoryId,
    store: S,
    state: SessionState,
    /// Editable datasets keyed by logical name or entity filename.
    editors: IndexMap<String, DatasetEditor>,
    /// Read-only context files (item/monster lists), raw text.
    references: IndexMap<String, String>,
    /// On-disk text as of load or last successful save.
    baselines: IndexMap<String, String>,
    entity_files: Vec<String>,
    status: Option<String>,
}

fn parse_with_mode(mode: ParseMode, raw: &str) -> muzen::Result<Dataset> {
    match mode {
        ParseMode::Flat { record_tag } => formats::parse_flat(raw, record_tag),
        ParseMode::Grouped {
            record_tag,
            child_tag,
        } => formats::parse_grouped(raw, record_tag, child_tag),
        ParseMode::Recipe { record_tag } => formats::parse_recipe(raw, record_tag),
        // Reference files are kept as raw text and never reach a parser.
        ParseMode::Ini | ParseMode::Reference => formats::parse_ini(raw),
    }
}

impl<S: ConfigStore> Session<S> {
    /// Create an unloaded session for a category.
    pub fn new(category: CategoryId, store: S) -> Self {
        Session {
            category,
            store,
            state: SessionState::Unloaded,
            editors: IndexMap::new(),
            references: IndexMap::new(),
            baselines: IndexMap::new(),
            entity_files: Vec::new(),
            status: None,
        }
    }

    /// The session's category.
    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Human-readable message from the last failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Fetch and parse every category file. Also the retry path out of
    /// `LoadFailed`; discards any in-memory state from a previous load.
    ///
    /// # Errors
    /// Any storage or parse failure blocks the whole category (there is no
    /// partial dataset) and is kept as the session status.
    pub fn load(&mut self) -> Result<()> {
        self.state = SessionState::Loading;
        self.editors.clear();
        self.references.clear();
        self.baselines.clear();
        self.entity_files.clear();

        match self.fetch_and_parse() {
            Ok(()) => {
                self.state = SessionState::Ready;
                self.status = None;
                info!(category = %self.category, files = self.editors.len(), "category loaded");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::LoadFailed;
                self.status = Some(format!("failed to load {}: {e}", self.category));
                Err(e)
            }
        }
    }

    fn fetch_and_parse(&mut self) -> Result<()> {
        let fetched = self.store.read_category(self.category)?;
        for spec in self.category.files() {
            let Some(raw) = fetched.files.get(spec.logical) else {
                return Err(Error::UnknownFile {
                    logical: spec.logical.to_string(),
                });
            };
            if spec.mode == ParseMode::Reference {
                self.references
                    .insert(spec.logical.to_string(), raw.clone());
            } else {
                let dataset = parse_with_mode(spec.mode, raw)?;
                self.editors
                    .insert(spec.logical.to_string(), DatasetEditor::new(dataset));
                self.baselines.insert(spec.logical.to_string(), raw.clone());
            }
        }
        self.entity_files = fetched.entity_files;
        Ok(())
    }

    /// Load one per-entity file (a shop, a map drop bag) into the session.
    ///
    /// # Errors
    /// Fails on pattern mismatch, missing file, or malformed content.
    pub fn open_entity(&mut self, filename: &str) -> Result<()> {
        self.ensure_ready()?;
        let mode = self
            .category
            .entity_mode()
            .ok_or_else(|| Error::UnknownFile {
                logical: filename.to_string(),
            })?;
        let raw = self.store.read_entity(self.category, filename)?;
        let dataset = parse_with_mode(mode, &raw)?;
        self.editors
            .insert(filename.to_string(), DatasetEditor::new(dataset));
        self.baselines.insert(filename.to_string(), raw);
        Ok(())
    }

    /// Names of all open editable files, in load order.
    #[must_use]
    pub fn open_files(&self) -> Vec<&str> {
        self.editors.keys().map(String::as_str).collect()
    }

    /// Per-entity filenames offered by the category.
    #[must_use]
    pub fn entity_files(&self) -> &[String] {
        &self.entity_files
    }

    /// Raw text of a read-only reference file.
    #[must_use]
    pub fn reference(&self, logical: &str) -> Option<&str> {
        self.references.get(logical).map(String::as_str)
    }

    /// The editor for one open file.
    #[must_use]
    pub fn editor(&self, name: &str) -> Option<&DatasetEditor> {
        self.editors.get(name)
    }

    /// Mutable editor access; only while the session is `Ready`.
    pub fn editor_mut(&mut self, name: &str) -> Option<&mut DatasetEditor> {
        if self.state != SessionState::Ready {
            return None;
        }
        self.editors.get_mut(name)
    }

    /// Names of files with unsaved edits.
    #[must_use]
    pub fn dirty_files(&self) -> Vec<&str> {
        self.editors
            .iter()
            .filter(|(_, editor)| editor.is_modified())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Serialize one open file and persist it through the store.
    ///
    /// Unchanged regenerated text short-circuits without touching disk. On
    /// failure the session stays `Ready` with edits and undo history intact.
    ///
    /// # Errors
    /// Fails if the session is not ready, the name is unknown, or the store
    /// rejects the write.
    pub fn save(&mut self, name: &str) -> Result<SaveOutcome> {
        self.ensure_ready()?;
        let Some(editor) = self.editors.get(name) else {
            return Err(Error::UnknownFile {
                logical: name.to_string(),
            });
        };
        let text = formats::serialize(editor.dataset())?;

        if self.baselines.get(name).map(String::as_str) == Some(text.as_str()) {
            if let Some(editor) = self.editors.get_mut(name) {
                editor.mark_saved();
            }
            info!(category = %self.category, file = name, "no changes to save");
            return Ok(SaveOutcome::Unchanged);
        }

        self.state = SessionState::Saving;
        let written = if self.category.file(name).is_some() {
            self.store.write_file(self.category, name, &text)
        } else {
            self.store.write_entity(self.category, name, &text)
        };
        self.state = SessionState::Ready;

        match written {
            Ok(()) => {
                self.baselines.insert(name.to_string(), text);
                if let Some(editor) = self.editors.get_mut(name) {
                    editor.mark_saved();
                }
                self.status = None;
                info!(category = %self.category, file = name, "saved");
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                self.status = Some(format!("failed to save {name}: {e}"));
                Err(e)
            }
        }
    }

    /// Save every open file, stopping at the first failure. Files save
    /// independently: earlier successes stay written even when a later file
    /// fails.
    ///
    /// # Errors
    /// Propagates the first save failure.
    pub fn save_all(&mut self) -> Result<Vec<(String, SaveOutcome)>> {
        let names: Vec<String> = self.editors.keys().cloned().collect();
        let mut outcomes = Vec::new();
        for name in names {
            let outcome = self.save(&name)?;
            outcomes.push((name, outcome));
        }
        Ok(outcomes)
    }

    /// What changed in one open file since its baseline.
    ///
    /// # Errors
    /// Fails if the name is unknown or the baseline no longer parses.
    pub fn change_summary(&self, name: &str) -> Result<DiffResult> {
        let editor = self.editors.get(name).ok_or_else(|| Error::UnknownFile {
            logical: name.to_string(),
        })?;
        let mode = self.mode_for(name)?;
        let baseline = self
            .baselines
            .get(name)
            .ok_or_else(|| Error::UnknownFile {
                logical: name.to_string(),
            })?;
        let before = parse_with_mode(mode, baseline)?;
        Ok(diff_datasets(&before, editor.dataset()))
    }

    fn mode_for(&self, name: &str) -> Result<ParseMode> {
        if let Some(spec) = self.category.file(name) {
            return Ok(spec.mode);
        }
        self.category
            .entity_mode()
            .ok_or_else(|| Error::UnknownFile {
                logical: name.to_string(),
            })
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.state == SessionState::Ready {
            Ok(())
        } else {
            Err(Error::NotLoaded {
                category: self.category.name().to_string(),
            })
        }
    }
}
