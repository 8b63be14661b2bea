//! Known-key tables for the editor formats
//!
//! The UI derives its columns from the union of keys present in a dataset;
//! these tables define the keys the formats are *expected* to carry, the
//! placeholder values for newly created entries, and which attributes are
//! omitted from output when empty.

use indexmap::IndexMap;

use super::record::Record;

/// Variable-cardinality attribute family on recipe records.
/// One value serializes as `MaxRate`, several as `MaxRate1..N`.
pub const RATE_FAMILY: &str = "MaxRate";

/// Element tag of a requirement group inside a recipe record.
pub const GROUP_TAG: &str = "Group";

/// Attribute carrying a group's index value.
pub const GROUP_INDEX_ATTR: &str = "Index";

/// Element tag of an item-rule inside a group.
pub const RULE_TAG: &str = "Data";

/// Item-rule attribute set, in canonical order.
pub const RULE_ATTRS: [&str; 10] = [
    "ItemMin", "ItemMax", "LevelMin", "LevelMax", "OptMin", "OptMax", "CountMin", "CountMax",
    "ItemType", "KindA",
];

/// Item-rule attributes omitted from output while their value is empty.
pub const OPTIONAL_RULE_ATTRS: [&str; 1] = ["KindA"];

/// Placeholder values for a freshly added item-rule: any item (flat id 0),
/// any level, any option, exactly one piece.
pub const RULE_DEFAULTS: [(&str, &str); 10] = [
    ("ItemMin", "0"),
    ("ItemMax", "0"),
    ("LevelMin", "0"),
    ("LevelMax", "255"),
    ("OptMin", "0"),
    ("OptMax", "255"),
    ("CountMin", "1"),
    ("CountMax", "1"),
    ("ItemType", "0"),
    ("KindA", ""),
];

/// Items per category in the flat id space.
pub const CATEGORY_WIDTH: u32 = 512;

/// True if the attribute may be dropped from output when empty.
#[must_use]
pub fn is_optional_attr(key: &str) -> bool {
    OPTIONAL_RULE_ATTRS.contains(&key)
}

/// A new item-rule seeded with the documented placeholder values.
#[must_use]
pub fn default_rule() -> Record {
    Record {
        attributes: RULE_DEFAULTS
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect::<IndexMap<_, _>>(),
        ..Record::default()
    }
}

/// Flat id of an item from its category/index pair.
#[must_use]
pub fn flat_id(cat: u32, index: u32) -> u32 {
    cat * CATEGORY_WIDTH + index
}

/// Category/index pair of an item from its flat id.
#[must_use]
pub fn cat_and_index(flat: u32) -> (u32, u32) {
    (flat / CATEGORY_WIDTH, flat % CATEGORY_WIDTH)
}
