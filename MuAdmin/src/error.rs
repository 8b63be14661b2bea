use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("MuZen error: {0}")]
    Zen(#[from] muzen::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// A required category file is missing on disk.
    #[error("required file not found: {path}")]
    FileNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A client-supplied filename failed the category's pattern check.
    /// Rejected before any I/O happens.
    #[error("invalid filename: {name}")]
    InvalidFilename {
        /// The rejected filename.
        name: String,
    },

    /// A category filename pattern failed to compile.
    #[error("invalid filename pattern: {0}")]
    InvalidPattern(String),

    /// A session operation needs the category loaded first.
    #[error("category {category} is not loaded")]
    NotLoaded {
        /// The category's name.
        category: String,
    },

    /// No file with this logical name in the active category.
    #[error("no such file in category: {logical}")]
    UnknownFile {
        /// The requested logical name.
        logical: String,
    },

    /// The platform has no cache directory for drafts.
    #[error("platform cache directory unavailable")]
    CacheDirUnavailable,
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
