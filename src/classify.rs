//! Item classifier.
//!
//! Assigns a category, rarity tier, per-unit weight, and per-unit value to a
//! named item using the layered rules tables. Unknown items never fail:
//! they fall back to category averages, so extraction always produces a
//! fully priced item.

use crate::patterns::{enhancement_bonus, ENHANCEMENT_BONUS};
use crate::tables::{
    lookup_with_substring, rarity_multiplier, CATEGORY_AVG_VALUE, CATEGORY_AVG_WEIGHT,
    CATEGORY_KEYWORDS, ITEM_VALUES, ITEM_WEIGHTS, MAGIC_OVERRIDE_KEYWORDS, RARITY_KEYWORDS,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad item categories for ledger grouping and average fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Weapons,
    Armor,
    Consumables,
    Tools,
    Magic,
    Valuables,
    Miscellaneous,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Weapons => "weapons",
            Category::Armor => "armor",
            Category::Consumables => "consumables",
            Category::Tools => "tools",
            Category::Magic => "magic",
            Category::Valuables => "valuables",
            Category::Miscellaneous => "miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Coarse magical-power tier used to scale estimated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Mundane,
    Masterwork,
    Minor,
    Moderate,
    Major,
    Legendary,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Mundane => "mundane",
            Rarity::Masterwork => "masterwork",
            Rarity::Minor => "minor",
            Rarity::Moderate => "moderate",
            Rarity::Major => "major",
            Rarity::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A fully classified item produced from one normalized phrase.
/// Immutable once produced; weight and value are per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub name: String,
    pub quantity: u32,
    pub category: Category,
    pub rarity: Rarity,
    pub weight: f32,
    pub value: f32,
}

impl ExtractedItem {
    pub fn total_weight(&self) -> f32 {
        self.weight * self.quantity as f32
    }

    pub fn total_value(&self) -> f32 {
        self.value * self.quantity as f32
    }
}

/// Classify a singular, title-cased item name into a fully priced item.
///
/// An explicit enhancement-bonus token ("+2 Longsword") drives both the
/// rarity tier and the standard enhancement pricing formula; the token is
/// dropped from the stored name since rarity and value encode it.
pub fn classify(name: &str, quantity: u32) -> ExtractedItem {
    let lower = name.to_lowercase();
    let bonus = enhancement_bonus(&lower);
    let lookup_name = strip_bonus_token(&lower);

    let rarity = detect_rarity(&lookup_name, bonus);
    let category = detect_category(&lookup_name);
    let weight = resolve_weight(&lookup_name, category);
    let value = resolve_value(&lookup_name, category, rarity, bonus);

    ExtractedItem {
        name: strip_bonus_token(name),
        quantity: quantity.max(1),
        category,
        rarity,
        weight,
        value,
    }
}

fn strip_bonus_token(name: &str) -> String {
    let stripped = ENHANCEMENT_BONUS.replace_all(name, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rarity detection: explicit bonus first, then rarity keywords, then
/// magic-adjacent keywords defaulting to Minor, otherwise Mundane.
fn detect_rarity(name: &str, bonus: Option<u32>) -> Rarity {
    if let Some(bonus) = bonus {
        return match bonus {
            0 | 1 => Rarity::Minor,
            2 => Rarity::Moderate,
            3 => Rarity::Major,
            _ => Rarity::Legendary,
        };
    }
    for (rarity, keywords) in RARITY_KEYWORDS.iter() {
        if keywords.iter().any(|kw| name.contains(kw)) {
            return *rarity;
        }
    }
    if MAGIC_OVERRIDE_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        return Rarity::Minor;
    }
    Rarity::Mundane
}

/// Category detection: magic override words win, then the keyword lists in
/// order, then the gem/jewel fallback (part of the Valuables list),
/// otherwise Miscellaneous.
fn detect_category(name: &str) -> Category {
    if MAGIC_OVERRIDE_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        return Category::Magic;
    }
    for (category, keywords) in CATEGORY_KEYWORDS.iter() {
        if keywords.iter().any(|kw| name.contains(kw)) {
            return *category;
        }
    }
    Category::Miscellaneous
}

/// Weight fallback chain: exact, substring, category average. Mithral and
/// darkwood halve the resolved weight.
fn resolve_weight(name: &str, category: Category) -> f32 {
    let base = lookup_with_substring(&ITEM_WEIGHTS, name)
        .unwrap_or_else(|| CATEGORY_AVG_WEIGHT[&category]);
    if name.contains("mithral") || name.contains("mithril") || name.contains("darkwood") {
        base / 2.0
    } else {
        base
    }
}

/// Value fallback chain: exact, substring, category average; then the rarity
/// multiplier, except that an explicit enhancement bonus on a weapon or
/// armor item prices as `max(base, 50) + bonus^2 * 2000` instead. Special
/// materials adjust the final figure.
fn resolve_value(name: &str, category: Category, rarity: Rarity, bonus: Option<u32>) -> f32 {
    let base = lookup_with_substring(&ITEM_VALUES, name)
        .unwrap_or_else(|| CATEGORY_AVG_VALUE[&category]);

    let mut value = match bonus {
        Some(bonus) if matches!(category, Category::Weapons | Category::Armor) => {
            base.max(50.0) + (bonus * bonus) as f32 * 2000.0
        }
        _ => base * rarity_multiplier(rarity),
    };

    if name.contains("mithral") || name.contains("mithril") {
        value += 500.0;
    }
    if name.contains("adamantine") {
        value += 3000.0;
    }
    if name.contains("cold iron") {
        value *= 2.0;
    }
    if name.contains("alchemical silver") || name.contains("silvered") {
        value += 90.0;
    }
    value
}
