//! Client filename validation
//!
//! Per-entity filenames arrive from the browser and are matched against the
//! category's anchored pattern before any path is built from them.

use regex::Regex;

use crate::error::{Error, Result};

/// A compiled, anchored filename pattern.
#[derive(Debug, Clone)]
pub struct FilePattern {
    regex: Regex,
}

impl FilePattern {
    /// Compile a pattern.
    ///
    /// # Errors
    /// Returns an error if the pattern is not a valid regex.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(FilePattern {
            regex: Regex::new(pattern)?,
        })
    }

    /// True if the filename matches.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Accept the filename or reject it as a client error.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFilename`] on mismatch.
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.matches(name) {
            Ok(())
        } else {
            Err(Error::InvalidFilename {
                name: name.to_string(),
            })
        }
    }
}
