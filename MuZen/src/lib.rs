//! # MuZen
//!
//! A pure-Rust library for working with MU Online game-server configuration
//! files: the XML tables (monster spawns, shops, drops, mix recipes, event
//! schedules) and INI control files the server reads at startup.
//!
//! The point of the crate is the round trip: parse a file into an ordered
//! record model, mutate it, and regenerate text the game server still
//! accepts, with attribute order preserved, unknown attributes kept, and
//! numeric strings untouched.
//!
//! ## Supported Formats
//!
//! - **Flat XML** - one element per record (`Event.xml`, `MonsterSpawn.xml`)
//! - **Grouped XML** - records keyed by `Index` with nested children
//!   (`InvasionManager.xml`, `InvasionMonsters.xml`)
//! - **Recipe XML** - mix → group → item-rule trees (`Mix.xml`)
//! - **INI** - `[section]` / `key=value` control files (`Event.ini`)
//!
//! ## Quick Start
//!
//! ```
//! use muzen::formats::{parse_flat, serialize_flat};
//! use muzen::edit::DatasetEditor;
//!
//! let xml = r#"<Events><Event id="1" enabled="true" /></Events>"#;
//! let dataset = parse_flat(xml, "Event")?;
//!
//! let mut editor = DatasetEditor::new(dataset);
//! editor.update_scalar(0, "enabled", "false");
//!
//! let out = serialize_flat(editor.dataset())?;
//! assert!(out.contains(r#"enabled="false""#));
//! # Ok::<(), muzen::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `muzen` command-line binary

pub mod diff;
pub mod edit;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::{ChildRecord, Dataset, DatasetFormat, Group, Record};
    pub use crate::formats::{
        parse_flat, parse_grouped, parse_ini, parse_recipe, serialize, serialize_flat,
        serialize_grouped, serialize_ini, serialize_recipe,
    };
    pub use crate::edit::{DatasetEditor, EditHistory};
    pub use crate::diff::{DiffResult, diff_datasets};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
