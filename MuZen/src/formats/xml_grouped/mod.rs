//! Index-grouped XML files
//!
//! Records (`<Invasion Index="1" Name="..">`) are keyed by their `Index`
//! attribute; duplicate indices merge into one record. Child elements are
//! captured either as the direct children of the group element
//! (`InvasionManager.xml`) or, with a filter tag, as every matching
//! descendant regardless of intermediate nesting (`InvasionMonsters.xml`).

mod reader;
mod writer;

pub use reader::{parse_grouped, read_grouped};
pub use writer::{serialize_grouped, write_grouped};
