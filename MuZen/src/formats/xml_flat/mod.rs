//! Flat attribute-bag XML files
//!
//! One element per record (`<Event id="1" .../>`), selected by tag name at
//! any depth under the root. Used by `Event.xml`, `MonsterSpawn.xml`,
//! `ZenDrop.xml` and most other single-level server tables.

mod reader;
mod writer;

pub use reader::{parse_flat, read_flat};
pub use writer::{serialize_flat, write_flat};
