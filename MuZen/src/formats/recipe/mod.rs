//! Recipe-tree XML files (`Mix.xml`)
//!
//! Three levels deep: `<Mix>` records carry scalar attributes plus the
//! `MaxRate` variable-cardinality family, `<Group Index="..">` collects the
//! item-rules a slot accepts, and each `<Data .../>` rule is a fixed
//! attribute set with `KindA` optional.

mod reader;
mod writer;

pub use reader::{parse_recipe, read_recipe};
pub use writer::{serialize_recipe, write_recipe};
