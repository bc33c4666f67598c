//! Pathfinder 1e rules tables.
//!
//! Read-only lookup tables behind the item classifier: per-item weight and
//! value maps, category and rarity keyword lists, category-average fallbacks,
//! and special-material modifiers. The classifier resolves through an
//! explicit fallback chain: exact name, then substring match in either
//! direction, then category average.

use crate::classify::{Category, Rarity};
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Per-item weight in pounds, keyed by lowercase singular name.
    pub static ref ITEM_WEIGHTS: HashMap<&'static str, f32> = HashMap::from([
        // Weapons
        ("dagger", 1.0),
        ("knife", 0.5),
        ("shortsword", 2.0),
        ("longsword", 4.0),
        ("greatsword", 8.0),
        ("bastard sword", 6.0),
        ("rapier", 2.0),
        ("scimitar", 4.0),
        ("club", 3.0),
        ("quarterstaff", 4.0),
        ("spear", 6.0),
        ("javelin", 2.0),
        ("handaxe", 3.0),
        ("battleaxe", 6.0),
        ("greataxe", 12.0),
        ("mace", 8.0),
        ("morningstar", 6.0),
        ("warhammer", 5.0),
        ("flail", 5.0),
        ("halberd", 12.0),
        ("glaive", 10.0),
        ("lance", 10.0),
        ("whip", 2.0),
        ("sling", 0.0),
        ("shortbow", 2.0),
        ("longbow", 3.0),
        ("crossbow", 4.0),
        ("arrow", 0.15),
        ("bolt", 0.1),
        // Armor and shields
        ("padded armor", 10.0),
        ("leather armor", 15.0),
        ("studded leather", 20.0),
        ("chain shirt", 25.0),
        ("hide armor", 25.0),
        ("scale mail", 30.0),
        ("chainmail", 40.0),
        ("chain mail", 40.0),
        ("breastplate", 30.0),
        ("splint mail", 45.0),
        ("banded mail", 35.0),
        ("half-plate", 50.0),
        ("full plate", 50.0),
        ("plate armor", 50.0),
        ("buckler", 5.0),
        ("shield", 10.0),
        ("tower shield", 45.0),
        ("helmet", 3.0),
        // Adventuring gear and tools
        ("torch", 1.0),
        ("lantern", 2.0),
        ("candle", 0.0),
        ("oil flask", 1.0),
        ("rope", 10.0),
        ("grappling hook", 4.0),
        ("backpack", 2.0),
        ("bedroll", 5.0),
        ("blanket", 3.0),
        ("tent", 20.0),
        ("waterskin", 4.0),
        ("ration", 1.0),
        ("crowbar", 5.0),
        ("shovel", 8.0),
        ("hammer", 2.0),
        ("piton", 0.5),
        ("sack", 0.5),
        ("pouch", 0.5),
        ("flask", 1.5),
        ("vial", 0.1),
        ("mirror", 0.5),
        ("whetstone", 1.0),
        ("flint and steel", 0.0),
        ("thieves' tools", 1.0),
        ("healer's kit", 1.0),
        ("chalk", 0.0),
        ("map", 0.1),
        ("spyglass", 1.0),
        ("chest", 25.0),
        ("key", 0.0),
        // Consumables
        ("potion", 0.1),
        ("elixir", 0.1),
        ("antitoxin", 0.1),
        ("scroll", 0.1),
        ("bread", 0.5),
        ("cheese", 0.5),
        ("meat", 0.5),
        ("apple", 0.5),
        ("wine", 1.5),
        ("ale", 1.0),
        // Magic and valuables
        ("wand", 0.1),
        ("rod", 5.0),
        ("staff", 4.0),
        ("ring", 0.0),
        ("amulet", 0.5),
        ("talisman", 0.5),
        ("orb", 2.0),
        ("tome", 3.0),
        ("spellbook", 3.0),
        ("book", 3.0),
        ("gem", 0.1),
        ("jewel", 0.1),
        ("pearl", 0.0),
        ("necklace", 0.1),
        ("bracelet", 0.1),
        ("crown", 2.0),
        ("goblet", 1.0),
        ("statuette", 3.0),
        ("idol", 5.0),
        ("ingot", 5.0),
        ("cloak", 1.0),
        ("boots", 1.0),
        ("gloves", 0.5),
        ("robe", 1.0),
    ]);

    /// Per-item value in gold pieces, keyed by lowercase singular name.
    pub static ref ITEM_VALUES: HashMap<&'static str, f32> = HashMap::from([
        // Weapons
        ("dagger", 2.0),
        ("knife", 0.5),
        ("shortsword", 10.0),
        ("longsword", 15.0),
        ("greatsword", 50.0),
        ("bastard sword", 35.0),
        ("rapier", 20.0),
        ("scimitar", 15.0),
        ("club", 0.1),
        ("quarterstaff", 0.1),
        ("spear", 2.0),
        ("javelin", 1.0),
        ("handaxe", 6.0),
        ("battleaxe", 10.0),
        ("greataxe", 20.0),
        ("mace", 12.0),
        ("morningstar", 8.0),
        ("warhammer", 12.0),
        ("flail", 8.0),
        ("halberd", 10.0),
        ("glaive", 8.0),
        ("lance", 10.0),
        ("whip", 1.0),
        ("sling", 0.1),
        ("shortbow", 30.0),
        ("longbow", 75.0),
        ("crossbow", 35.0),
        ("arrow", 0.05),
        ("bolt", 0.1),
        // Armor and shields
        ("padded armor", 5.0),
        ("leather armor", 10.0),
        ("studded leather", 25.0),
        ("chain shirt", 100.0),
        ("hide armor", 15.0),
        ("scale mail", 50.0),
        ("chainmail", 150.0),
        ("chain mail", 150.0),
        ("breastplate", 200.0),
        ("splint mail", 200.0),
        ("banded mail", 250.0),
        ("half-plate", 600.0),
        ("full plate", 1500.0),
        ("plate armor", 1500.0),
        ("buckler", 5.0),
        ("shield", 7.0),
        ("tower shield", 30.0),
        ("helmet", 10.0),
        // Adventuring gear and tools
        ("torch", 0.01),
        ("lantern", 7.0),
        ("candle", 0.01),
        ("oil flask", 0.1),
        ("rope", 1.0),
        ("grappling hook", 1.0),
        ("backpack", 2.0),
        ("bedroll", 0.1),
        ("blanket", 0.5),
        ("tent", 10.0),
        ("waterskin", 1.0),
        ("ration", 0.5),
        ("crowbar", 2.0),
        ("shovel", 2.0),
        ("hammer", 0.5),
        ("piton", 0.1),
        ("sack", 0.1),
        ("pouch", 1.0),
        ("flask", 0.03),
        ("vial", 1.0),
        ("mirror", 10.0),
        ("whetstone", 0.02),
        ("flint and steel", 1.0),
        ("thieves' tools", 30.0),
        ("healer's kit", 50.0),
        ("chalk", 0.01),
        ("map", 10.0),
        ("spyglass", 1000.0),
        ("chest", 2.0),
        ("key", 0.1),
        // Consumables
        ("potion", 50.0),
        ("elixir", 250.0),
        ("antitoxin", 50.0),
        ("scroll", 25.0),
        ("bread", 0.02),
        ("cheese", 0.1),
        ("meat", 0.3),
        ("apple", 0.02),
        ("wine", 2.0),
        ("ale", 0.04),
        // Magic and valuables
        ("wand", 375.0),
        ("rod", 500.0),
        ("staff", 1000.0),
        ("ring", 50.0),
        ("amulet", 100.0),
        ("talisman", 100.0),
        ("orb", 200.0),
        ("tome", 50.0),
        ("spellbook", 15.0),
        ("book", 10.0),
        ("gem", 100.0),
        ("jewel", 250.0),
        ("pearl", 100.0),
        ("necklace", 150.0),
        ("bracelet", 75.0),
        ("crown", 1000.0),
        ("goblet", 25.0),
        ("statuette", 100.0),
        ("idol", 200.0),
        ("ingot", 50.0),
        ("cloak", 1.0),
        ("boots", 1.0),
        ("gloves", 0.5),
        ("robe", 1.0),
    ]);

    /// Category keyword lists, scanned in declaration order. Magic override
    /// words are handled separately and take precedence (see classifier).
    pub static ref CATEGORY_KEYWORDS: Vec<(Category, Vec<&'static str>)> = vec![
        (Category::Weapons, vec![
            "sword", "dagger", "knife", "blade", "axe", "mace", "hammer", "flail",
            "morningstar", "bow", "crossbow", "arrow", "bolt", "sling", "spear",
            "javelin", "lance", "pike", "trident", "halberd", "glaive", "whip",
            "club", "quarterstaff", "rapier", "scimitar", "katana", "maul", "dart",
            "shuriken", "dirk",
        ]),
        (Category::Armor, vec![
            "armor", "armour", "mail", "plate", "shield", "buckler", "breastplate",
            "cuirass", "helm", "helmet", "gauntlet", "greaves", "bracers",
        ]),
        (Category::Consumables, vec![
            "potion", "elixir", "draught", "philter", "tonic", "salve", "ointment",
            "poultice", "antidote", "antitoxin", "scroll", "ration", "bread",
            "cheese", "meat", "apple", "wine", "ale", "bandage", "herb", "mushroom",
        ]),
        (Category::Tools, vec![
            "rope", "torch", "lantern", "candle", "tool", "kit", "crowbar", "shovel",
            "pick", "piton", "tent", "bedroll", "blanket", "backpack", "sack",
            "pouch", "flask", "vial", "waterskin", "lockpick", "grappling",
            "tinderbox", "mirror", "whetstone", "chisel", "saw", "needle", "quill",
            "ink", "parchment", "map", "compass", "spyglass", "chest", "key",
        ]),
        (Category::Magic, vec![
            "wand", "rod", "orb", "talisman", "amulet", "charm", "relic", "artifact",
            "tome", "grimoire", "spellbook", "crystal", "rune", "phylactery",
        ]),
        (Category::Valuables, vec![
            "gem", "jewel", "jewelry", "ruby", "emerald", "sapphire", "diamond",
            "pearl", "opal", "amber", "amethyst", "necklace", "bracelet", "earring",
            "ring", "crown", "tiara", "circlet", "goblet", "chalice", "statuette",
            "figurine", "idol", "ingot", "brooch", "locket", "pendant", "treasure",
        ]),
    ];

    /// Words that force the Magic category and, absent other signals,
    /// default the rarity to Minor.
    pub static ref MAGIC_OVERRIDE_KEYWORDS: Vec<&'static str> = vec![
        "magic", "magical", "enchanted", "blessed", "cursed", "arcane", "eldritch",
        "runic", "glowing",
    ];

    /// Rarity keyword lists, scanned in declaration order.
    pub static ref RARITY_KEYWORDS: Vec<(Rarity, Vec<&'static str>)> = vec![
        (Rarity::Mundane, vec![
            "mundane", "common", "ordinary", "simple", "plain", "rusty", "worn",
            "crude", "battered",
        ]),
        (Rarity::Masterwork, vec![
            "masterwork", "fine", "exquisite", "superior", "well-crafted",
        ]),
        (Rarity::Minor, vec!["minor", "lesser", "faint"]),
        (Rarity::Moderate, vec!["moderate"]),
        (Rarity::Major, vec!["major", "greater", "powerful", "potent"]),
        (Rarity::Legendary, vec![
            "legendary", "mythic", "mythical", "fabled", "epic", "artifact",
        ]),
    ];

    /// Fallback weight per category when no table row matches.
    pub static ref CATEGORY_AVG_WEIGHT: HashMap<Category, f32> = HashMap::from([
        (Category::Weapons, 5.0),
        (Category::Armor, 25.0),
        (Category::Consumables, 0.5),
        (Category::Tools, 2.0),
        (Category::Magic, 1.0),
        (Category::Valuables, 0.1),
        (Category::Miscellaneous, 1.0),
    ]);

    /// Fallback value per category when no table row matches.
    pub static ref CATEGORY_AVG_VALUE: HashMap<Category, f32> = HashMap::from([
        (Category::Weapons, 15.0),
        (Category::Armor, 50.0),
        (Category::Consumables, 25.0),
        (Category::Tools, 2.0),
        (Category::Magic, 200.0),
        (Category::Valuables, 100.0),
        (Category::Miscellaneous, 1.0),
    ]);
}

/// Value multiplier applied per rarity tier (superseded by explicit
/// enhancement-bonus pricing on weapons and armor).
pub fn rarity_multiplier(rarity: Rarity) -> f32 {
    match rarity {
        Rarity::Mundane => 1.0,
        Rarity::Masterwork => 3.0,
        Rarity::Minor => 10.0,
        Rarity::Moderate => 50.0,
        Rarity::Major => 200.0,
        Rarity::Legendary => 1000.0,
    }
}

/// Look up an exact table row, then fall back to the longest substring match
/// in either direction. Returns `None` when nothing in the table relates.
pub fn lookup_with_substring(table: &HashMap<&'static str, f32>, name: &str) -> Option<f32> {
    if let Some(&v) = table.get(name) {
        return Some(v);
    }
    // Longest key wins so "chain shirt" beats "shirt"; ties break on key
    // order for determinism.
    let mut best: Option<(&str, f32)> = None;
    for (&key, &value) in table.iter() {
        if name.contains(key) || key.contains(name) {
            match best {
                Some((bk, _)) if (key.len(), key) <= (bk.len(), bk) => {}
                _ => best = Some((key, value)),
            }
        }
    }
    best.map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        assert_eq!(lookup_with_substring(&ITEM_VALUES, "longsword"), Some(15.0));
        assert_eq!(lookup_with_substring(&ITEM_WEIGHTS, "torch"), Some(1.0));
    }

    #[test]
    fn test_substring_lookup_both_directions() {
        // Query contains a table key.
        assert_eq!(
            lookup_with_substring(&ITEM_VALUES, "jeweled dagger"),
            Some(2.0)
        );
        // Table key contains the query.
        assert_eq!(
            lookup_with_substring(&ITEM_WEIGHTS, "grappling"),
            Some(4.0)
        );
    }

    #[test]
    fn test_longest_key_wins() {
        // "studded leather" must not resolve through the shorter
        // "leather armor" row.
        assert_eq!(
            lookup_with_substring(&ITEM_VALUES, "studded leather"),
            Some(25.0)
        );
    }

    #[test]
    fn test_missing_item() {
        assert_eq!(lookup_with_substring(&ITEM_VALUES, "weird contraption"), None);
    }

    #[test]
    fn test_rarity_multiplier_endpoints() {
        assert_eq!(rarity_multiplier(Rarity::Mundane), 1.0);
        assert_eq!(rarity_multiplier(Rarity::Legendary), 1000.0);
    }
}
