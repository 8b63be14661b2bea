//! Editor category registry
//!
//! Each editor page works on one category: a fixed set of files read
//! together, each with the parse mode that matches its schema. Reference
//! files (item and monster lists) ride along for name lookups but are never
//! written back. Categories with per-entity file sets (one XML per shop, one
//! bag per monster map) also carry a directory and a strict filename
//! pattern; anything not matching the pattern is rejected before I/O.

use std::fmt;

/// One editor category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryId {
    /// Monster spawn locations (`MonsterSpawn.xml`).
    MonsterSpawns,
    /// Zen/item drop rates and excellent option tables.
    Drops,
    /// Shop inventories: master list plus one file per shop.
    Shops,
    /// Chaos machine recipes (`Mix.xml` and companions).
    Mixes,
    /// Per-map drop bags, one XML per monster map.
    MapDrops,
    /// Scheduled events, invasions, and the event INI.
    Events,
}

/// How one category file maps onto the record model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Flat attribute-bag records selected by tag.
    Flat {
        /// Record element tag.
        record_tag: &'static str,
    },
    /// Index-grouped records with nested children.
    Grouped {
        /// Record element tag.
        record_tag: &'static str,
        /// Capture only this descendant tag; `None` captures direct children.
        child_tag: Option<&'static str>,
    },
    /// Recipe trees (record → group → item-rule).
    Recipe {
        /// Record element tag.
        record_tag: &'static str,
    },
    /// `[section]` / `key=value` files.
    Ini,
    /// Read-only context file (name lookups); never written back.
    Reference,
}

/// One file inside a category.
#[derive(Debug, Clone, Copy)]
pub struct FileSpec {
    /// Logical name used on the wire and in sessions.
    pub logical: &'static str,
    /// On-disk path relative to the data root.
    pub path: &'static str,
    /// How to parse it.
    pub mode: ParseMode,
}

const MONSTER_SPAWN_FILES: &[FileSpec] = &[
    FileSpec {
        logical: "monster_spawn",
        path: "Monster/MonsterSpawn.xml",
        mode: ParseMode::Grouped {
            record_tag: "Spawn",
            child_tag: None,
        },
    },
    FileSpec {
        logical: "monster_list",
        path: "Monster/MonsterList.xml",
        mode: ParseMode::Reference,
    },
];

const DROP_FILES: &[FileSpec] = &[
    FileSpec {
        logical: "zen_drop",
        path: "Drop/ZenDrop.xml",
        mode: ParseMode::Flat { record_tag: "Drop" },
    },
    FileSpec {
        logical: "item_excellent_options",
        path: "Item/ItemExcellentOptions.xml",
        mode: ParseMode::Flat {
            record_tag: "Option",
        },
    },
    FileSpec {
        logical: "item_list",
        path: "Item/ItemList.xml",
        mode: ParseMode::Reference,
    },
];

const SHOP_FILES: &[FileSpec] = &[
    FileSpec {
        logical: "shop_list",
        path: "Shop/ShopList.xml",
        mode: ParseMode::Flat { record_tag: "Shop" },
    },
    FileSpec {
        logical: "item_stack",
        path: "Item/ItemStack.xml",
        mode: ParseMode::Flat { record_tag: "Item" },
    },
    FileSpec {
        logical: "item_list",
        path: "Item/ItemList.xml",
        mode: ParseMode::Reference,
    },
    FileSpec {
        logical: "item_excellent_options",
        path: "Item/ItemExcellentOptions.xml",
        mode: ParseMode::Reference,
    },
];

const MIX_FILES: &[FileSpec] = &[
    FileSpec {
        logical: "mix",
        path: "Mix/Mix.xml",
        mode: ParseMode::Recipe { record_tag: "Mix" },
    },
    FileSpec {
        logical: "angel_weapon_upgrade",
        path: "Mix/AngelWeaponUpgrade.xml",
        mode: ParseMode::Flat { record_tag: "Mix" },
    },
    FileSpec {
        logical: "mastery_item_mix",
        path: "Mix/MasteryItemMix.xml",
        mode: ParseMode::Flat { record_tag: "Mix" },
    },
    FileSpec {
        logical: "mix_disable",
        path: "Mix/MixDisable.xml",
        mode: ParseMode::Flat { record_tag: "Mix" },
    },
    FileSpec {
        logical: "mix_jewel_template",
        path: "Mix/MixJewelTemplate.xml",
        mode: ParseMode::Flat { record_tag: "Mix" },
    },
    FileSpec {
        logical: "mix_lucky_template",
        path: "Mix/MixLuckyTemplate.xml",
        mode: ParseMode::Flat { record_tag: "Mix" },
    },
    FileSpec {
        logical: "mix_spell_stone",
        path: "Mix/MixSpellStone.xml",
        mode: ParseMode::Flat { record_tag: "Mix" },
    },
    FileSpec {
        logical: "item_list",
        path: "Item/ItemList.xml",
        mode: ParseMode::Reference,
    },
];

const MAP_DROP_FILES: &[FileSpec] = &[
    FileSpec {
        logical: "pentagram_drop_rate",
        path: "Drop/PentagramDropRate.xml",
        mode: ParseMode::Flat { record_tag: "Drop" },
    },
    FileSpec {
        logical: "socket_item_drop_rates",
        path: "Drop/SocketItemDropRates.xml",
        mode: ParseMode::Flat { record_tag: "Drop" },
    },
    FileSpec {
        logical: "item_drop_rate_control",
        path: "Drop/ItemDropRateControl.ini",
        mode: ParseMode::Ini,
    },
    FileSpec {
        logical: "monster_list",
        path: "Monster/MonsterList.xml",
        mode: ParseMode::Reference,
    },
    FileSpec {
        logical: "item_list",
        path: "Item/ItemList.xml",
        mode: ParseMode::Reference,
    },
    FileSpec {
        logical: "mastery_exc_options",
        path: "Item/MasteryExcOptions.xml",
        mode: ParseMode::Reference,
    },
];

const EVENT_FILES: &[FileSpec] = &[
    FileSpec {
        logical: "event",
        path: "Event/Event.xml",
        mode: ParseMode::Flat {
            record_tag: "Event",
        },
    },
    FileSpec {
        logical: "invasion_manager",
        path: "Event/InvasionManager.xml",
        mode: ParseMode::Grouped {
            record_tag: "Invasion",
            child_tag: None,
        },
    },
    FileSpec {
        logical: "event_ini",
        path: "Event/Event.ini",
        mode: ParseMode::Ini,
    },
    FileSpec {
        logical: "event_season_manager",
        path: "Event/EventSeasonManager.xml",
        mode: ParseMode::Flat {
            record_tag: "Event",
        },
    },
    FileSpec {
        logical: "invasion_monsters",
        path: "Event/InvasionMonsters.xml",
        mode: ParseMode::Grouped {
            record_tag: "Invasion",
            child_tag: Some("Monster"),
        },
    },
];

impl CategoryId {
    /// All categories, in editor menu order.
    #[must_use]
    pub fn all() -> [CategoryId; 6] {
        [
            CategoryId::MonsterSpawns,
            CategoryId::Drops,
            CategoryId::Shops,
            CategoryId::Mixes,
            CategoryId::MapDrops,
            CategoryId::Events,
        ]
    }

    /// Stable name, used for backup subdirectories and status messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CategoryId::MonsterSpawns => "monster_spawns",
            CategoryId::Drops => "drops",
            CategoryId::Shops => "shops",
            CategoryId::Mixes => "mixes",
            CategoryId::MapDrops => "map_drops",
            CategoryId::Events => "events",
        }
    }

    /// The category's fixed file set.
    #[must_use]
    pub fn files(self) -> &'static [FileSpec] {
        match self {
            CategoryId::MonsterSpawns => MONSTER_SPAWN_FILES,
            CategoryId::Drops => DROP_FILES,
            CategoryId::Shops => SHOP_FILES,
            CategoryId::Mixes => MIX_FILES,
            CategoryId::MapDrops => MAP_DROP_FILES,
            CategoryId::Events => EVENT_FILES,
        }
    }

    /// Look up one file by logical name.
    #[must_use]
    pub fn file(self, logical: &str) -> Option<&'static FileSpec> {
        self.files().iter().find(|spec| spec.logical == logical)
    }

    /// Directory of per-entity files, relative to the data root.
    #[must_use]
    pub fn entity_dir(self) -> Option<&'static str> {
        match self {
            CategoryId::Shops => Some("Shop/Shops"),
            CategoryId::MapDrops => Some("Drop/EachMonsterMapDrop"),
            _ => None,
        }
    }

    /// Strict filename pattern for per-entity files.
    #[must_use]
    pub fn entity_pattern(self) -> Option<&'static str> {
        match self {
            CategoryId::Shops => Some(r"^Shop\(\d+\)_.+\.xml$"),
            CategoryId::MapDrops => Some(r"^MonsterMap_\(\d+\)_Bag\.xml$"),
            _ => None,
        }
    }

    /// Parse mode of per-entity files.
    #[must_use]
    pub fn entity_mode(self) -> Option<ParseMode> {
        match self {
            CategoryId::Shops => Some(ParseMode::Flat { record_tag: "Item" }),
            CategoryId::MapDrops => Some(ParseMode::Flat { record_tag: "Drop" }),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_names_unique_per_category() {
        for category in CategoryId::all() {
            let mut seen = std::collections::HashSet::new();
            for spec in category.files() {
                assert!(
                    seen.insert(spec.logical),
                    "duplicate logical name {} in {category}",
                    spec.logical
                );
            }
        }
    }

    #[test]
    fn test_entity_categories_fully_specified() {
        for category in CategoryId::all() {
            assert_eq!(
                category.entity_dir().is_some(),
                category.entity_pattern().is_some()
            );
            assert_eq!(
                category.entity_dir().is_some(),
                category.entity_mode().is_some()
            );
        }
    }

    #[test]
    fn test_file_lookup() {
        let spec = CategoryId::Events.file("event_ini").unwrap();
        assert_eq!(spec.path, "Event/Event.ini");
        assert_eq!(spec.mode, ParseMode::Ini);
        assert!(CategoryId::Events.file("nope").is_none());
    }
}
