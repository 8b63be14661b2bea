//! Line-oriented INI files (`Event.ini`, `ItemDropRateControl.ini`)
//!
//! Each `[section]` becomes one record carrying a synthetic `Section`
//! attribute plus its `key=value` lines in order.

mod reader;
mod writer;

/// Synthetic attribute holding a record's section name.
pub const SECTION_ATTR: &str = "Section";

pub use reader::{parse_ini, read_ini};
pub use writer::{serialize_ini, write_ini};
