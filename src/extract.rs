//! Transaction extractor.
//!
//! Runs the full pattern library over one block of narrative text and
//! produces a complete change-set: items gained, items lost, currency
//! gained, currency lost, each fully enriched by the classifier. Extraction
//! is a pure function with no I/O; anomalies from imperfect phrasing are
//! absorbed as conservative defaults and never surface as errors.

use crate::classify::{classify, ExtractedItem};
use crate::normalize::normalize_phrase;
use crate::patterns::{EventClass, EXTRACTION_RULES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bucket of coin amounts, one per denomination. All unsigned: losses are
/// clamped downstream, never represented as negative amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins {
    pub cp: u32,
    pub sp: u32,
    pub gp: u32,
    pub pp: u32,
}

impl Coins {
    pub fn is_empty(&self) -> bool {
        self.cp == 0 && self.sp == 0 && self.gp == 0 && self.pp == 0
    }

    fn add(&mut self, denomination: &str, amount: u32) {
        let slot = match denomination.to_lowercase().as_str() {
            "cp" | "copper" => &mut self.cp,
            "sp" | "silver" => &mut self.sp,
            "gp" | "gold" => &mut self.gp,
            "pp" | "platinum" => &mut self.pp,
            _ => return,
        };
        *slot = slot.saturating_add(amount);
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for (amount, label) in [
            (self.pp, "pp"),
            (self.gp, "gp"),
            (self.sp, "sp"),
            (self.cp, "cp"),
        ] {
            if amount > 0 {
                parts.push(format!("{amount} {label}"));
            }
        }
        if parts.is_empty() {
            write!(f, "0 gp")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// The structured result of extracting one block of narrative text.
/// Transient: offered to the confirmation step, then applied whole or
/// discarded whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeSet {
    pub items_gained: Vec<ExtractedItem>,
    pub items_lost: Vec<ExtractedItem>,
    pub money_gained: Coins,
    pub money_lost: Coins,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.items_gained.is_empty()
            && self.items_lost.is_empty()
            && self.money_gained.is_empty()
            && self.money_lost.is_empty()
    }
}

/// Extract all item and currency transfers from one narrative block.
///
/// Every rule runs against the whole block independently; overlapping
/// matches are all honored, so the result may over-report. Ordering within
/// one matched phrase list is left-to-right as written; no ordering is
/// guaranteed across rule classes.
pub fn extract(text: &str) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for rule in EXTRACTION_RULES.iter() {
        for caps in rule.pattern.captures_iter(text) {
            match rule.class {
                EventClass::ItemGained | EventClass::ItemLost => {
                    let span = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                    let items = normalize_phrase(span)
                        .into_iter()
                        .map(|p| classify(&p.name, p.quantity));
                    match rule.class {
                        EventClass::ItemGained => changes.items_gained.extend(items),
                        _ => changes.items_lost.extend(items),
                    }
                }
                EventClass::CurrencyGained | EventClass::CurrencyLost => {
                    // Amounts too large for u32 clamp to the ceiling rather
                    // than dropping the transfer.
                    let amount: u32 = caps
                        .get(1)
                        .map(|m| m.as_str().parse().unwrap_or(u32::MAX))
                        .unwrap_or(0);
                    let denomination = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                    let bucket = match rule.class {
                        EventClass::CurrencyGained => &mut changes.money_gained,
                        _ => &mut changes.money_lost,
                    };
                    bucket.add(denomination, amount);
                }
            }
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Rarity;

    #[test]
    fn test_orc_drop_scenario() {
        let changes = extract("The orc drops a +1 dagger and 25 gold pieces.");

        assert_eq!(changes.items_gained.len(), 1);
        let dagger = &changes.items_gained[0];
        assert_eq!(dagger.name, "Dagger");
        assert_eq!(dagger.quantity, 1);
        assert_eq!(dagger.rarity, Rarity::Minor);

        assert_eq!(changes.money_gained.gp, 25);
        assert_eq!(changes.money_gained.sp, 0);
        assert!(changes.items_lost.is_empty());
        assert!(changes.money_lost.is_empty());
    }

    #[test]
    fn test_multiple_items_in_one_clause() {
        let changes = extract("You find a rope, two torches and a bedroll in the chest.");
        let names: Vec<_> = changes
            .items_gained
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Rope", "Torch", "Bedroll"]);
        assert_eq!(changes.items_gained[1].quantity, 2);
    }

    #[test]
    fn test_loss_and_spend() {
        let changes = extract("You drop the torch. The crossing costs you 5 silver.");
        assert_eq!(changes.items_lost.len(), 1);
        assert_eq!(changes.items_lost[0].name, "Torch");
        assert_eq!(changes.money_lost.sp, 5);
        assert!(changes.money_gained.is_empty());
    }

    #[test]
    fn test_purchase_prices_as_currency_loss() {
        let changes = extract("You buy a coil of rope for 2 gold.");
        assert_eq!(changes.money_lost.gp, 2);
        assert_eq!(changes.items_gained.len(), 1);
        // Price clause trimmed off the item phrase.
        assert_eq!(changes.items_gained[0].name, "Coil Of Rope");
    }

    #[test]
    fn test_oversized_currency_amount_clamps() {
        let changes = extract("You receive 99999999999 gold.");
        assert_eq!(changes.money_gained.gp, u32::MAX);
    }

    #[test]
    fn test_plain_narration_extracts_nothing() {
        let changes = extract("The tavern is warm, and the bard plays a slow tune.");
        assert!(changes.is_empty());
    }

    #[test]
    fn test_denomination_normalization() {
        let changes = extract("You receive 3 pp. Later you find 40 copper.");
        assert_eq!(changes.money_gained.pp, 3);
        assert_eq!(changes.money_gained.cp, 40);
        // Bare coin phrases never become items.
        assert!(changes.items_gained.is_empty());
    }
}
