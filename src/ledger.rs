//! Possessions ledger and change-set application.
//!
//! The ledger is the authoritative list of possessions for a character,
//! owned by the host-persisted character record and mutated in place. A
//! change-set is applied all-or-nothing: structural validation runs before
//! any mutation, and every narrative-derived anomaly (losing more than is
//! held, losing an absent item) is clamped rather than raised.

use crate::capacity::{recompute, CapacitySnapshot};
use crate::classify::{Category, ExtractedItem, Rarity};
use crate::extract::{ChangeSet, Coins};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural contract violations in a change-set. These indicate a caller
/// bug, not a runtime condition to recover from; nothing is applied when
/// validation fails.
#[derive(Debug, Error)]
pub enum ChangeSetError {
    #[error("malformed change-set: {0}")]
    Malformed(String),
}

/// How a possession entered the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSource {
    Manual,
    AutoDetected,
}

/// One possession record. At most one entry exists per distinct item name
/// (case-insensitive); an entry whose quantity reaches zero is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub name: String,
    pub quantity: u32,
    pub category: Category,
    pub rarity: Rarity,
    pub weight: f32,
    pub value: f32,
    pub equipped: bool,
    pub notes: String,
    pub source: ItemSource,
}

impl LedgerEntry {
    pub fn total_weight(&self) -> f32 {
        self.weight * self.quantity as f32
    }

    pub fn total_value(&self) -> f32 {
        self.value * self.quantity as f32
    }
}

/// Coin on hand, one non-negative count per denomination. Losses clamp at
/// zero; no denomination ever goes negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPurse {
    pub cp: u32,
    pub sp: u32,
    pub gp: u32,
    pub pp: u32,
}

impl CurrencyPurse {
    /// Add coins to the purse.
    pub fn gain(&mut self, coins: &Coins) {
        self.cp = self.cp.saturating_add(coins.cp);
        self.sp = self.sp.saturating_add(coins.sp);
        self.gp = self.gp.saturating_add(coins.gp);
        self.pp = self.pp.saturating_add(coins.pp);
    }

    /// Remove coins, clamped to what is on hand. Returns the amounts
    /// actually removed.
    pub fn spend(&mut self, coins: &Coins) -> Coins {
        let spent = Coins {
            cp: self.cp.min(coins.cp),
            sp: self.sp.min(coins.sp),
            gp: self.gp.min(coins.gp),
            pp: self.pp.min(coins.pp),
        };
        self.cp -= spent.cp;
        self.sp -= spent.sp;
        self.gp -= spent.gp;
        self.pp -= spent.pp;
        spent
    }
}

/// The authoritative possessions list for one character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an entry by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&LedgerEntry> {
        let lower = name.to_lowercase();
        self.entries.iter().find(|e| e.name.to_lowercase() == lower)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut LedgerEntry> {
        let lower = name.to_lowercase();
        self.entries
            .iter_mut()
            .find(|e| e.name.to_lowercase() == lower)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Total carried weight across all entries.
    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(LedgerEntry::total_weight).sum()
    }

    /// Total monetary value of all possessions (coin excluded).
    pub fn total_value(&self) -> f32 {
        self.entries.iter().map(LedgerEntry::total_value).sum()
    }

    /// Insert a possession outside the narration pipeline (host UI edits).
    /// Merges into an existing entry of the same name.
    pub fn add_manual(&mut self, item: ExtractedItem, notes: impl Into<String>) {
        match self.find_mut(&item.name) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(item.quantity),
            None => self.entries.push(LedgerEntry {
                name: item.name,
                quantity: item.quantity,
                category: item.category,
                rarity: item.rarity,
                weight: item.weight,
                value: item.value,
                equipped: false,
                notes: notes.into(),
                source: ItemSource::Manual,
            }),
        }
    }

    /// Toggle the equipped flag on an entry. Returns false if no entry
    /// matches.
    pub fn set_equipped(&mut self, name: &str, equipped: bool) -> bool {
        match self.find_mut(name) {
            Some(entry) => {
                entry.equipped = equipped;
                true
            }
            None => false,
        }
    }
}

/// Human-readable record of one applied change-set, plus the capacity
/// snapshot derived from the post-apply ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedSummary {
    pub lines: Vec<String>,
    pub capacity: CapacitySnapshot,
}

/// Merge a confirmed change-set into the ledger and purse.
///
/// Validation runs over the whole set before any mutation, so a rejected
/// set leaves both untouched. Gains merge by case-insensitive name; losses
/// clamp at zero and silently no-op on absent items; currency losses
/// saturate at an empty purse.
pub fn apply(
    ledger: &mut Ledger,
    purse: &mut CurrencyPurse,
    changes: &ChangeSet,
    strength: u8,
) -> Result<AppliedSummary, ChangeSetError> {
    validate(changes)?;

    let mut lines = Vec::new();

    for item in &changes.items_gained {
        match ledger.find_mut(&item.name) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(item.quantity);
                entry.notes.push_str(&format!("; +{} via narration", item.quantity));
            }
            None => ledger.entries.push(LedgerEntry {
                name: item.name.clone(),
                quantity: item.quantity,
                category: item.category,
                rarity: item.rarity,
                weight: item.weight,
                value: item.value,
                equipped: false,
                notes: "auto-detected from narration".to_string(),
                source: ItemSource::AutoDetected,
            }),
        }
        lines.push(format!(
            "+{} {} ({}lbs, {}gp)",
            item.quantity,
            item.name,
            fmt_amount(item.total_weight()),
            fmt_amount(item.total_value()),
        ));
    }

    for item in &changes.items_lost {
        let lower = item.name.to_lowercase();
        let Some(idx) = ledger
            .entries
            .iter()
            .position(|e| e.name.to_lowercase() == lower)
        else {
            // Losing an absent item is a no-op.
            continue;
        };
        let removed = ledger.entries[idx].quantity.min(item.quantity);
        ledger.entries[idx].quantity -= removed;
        if ledger.entries[idx].quantity == 0 {
            ledger.entries.remove(idx);
        }
        if removed > 0 {
            lines.push(format!("-{} {}", removed, item.name));
        }
    }

    purse.gain(&changes.money_gained);
    let spent = purse.spend(&changes.money_lost);
    for (amount, label) in [
        (changes.money_gained.pp, "pp"),
        (changes.money_gained.gp, "gp"),
        (changes.money_gained.sp, "sp"),
        (changes.money_gained.cp, "cp"),
    ] {
        if amount > 0 {
            lines.push(format!("+{amount} {label}"));
        }
    }
    for (amount, label) in [(spent.pp, "pp"), (spent.gp, "gp"), (spent.sp, "sp"), (spent.cp, "cp")]
    {
        if amount > 0 {
            lines.push(format!("-{amount} {label}"));
        }
    }

    Ok(AppliedSummary {
        lines,
        capacity: recompute(ledger, strength),
    })
}

/// Structural precondition check. The unsigned type layer already rules out
/// negative quantities and unknown denominations; this rejects the
/// remaining representable invalid states.
fn validate(changes: &ChangeSet) -> Result<(), ChangeSetError> {
    for item in changes.items_gained.iter().chain(&changes.items_lost) {
        if item.name.trim().is_empty() {
            return Err(ChangeSetError::Malformed("item with empty name".into()));
        }
        if item.quantity == 0 {
            return Err(ChangeSetError::Malformed(format!(
                "zero quantity for {:?}",
                item.name
            )));
        }
        if !item.weight.is_finite() || item.weight < 0.0 {
            return Err(ChangeSetError::Malformed(format!(
                "invalid weight for {:?}",
                item.name
            )));
        }
        if !item.value.is_finite() || item.value < 0.0 {
            return Err(ChangeSetError::Malformed(format!(
                "invalid value for {:?}",
                item.name
            )));
        }
    }
    Ok(())
}

/// Format a weight or value the way a character sheet would: no trailing
/// zeros, at most two decimals.
fn fmt_amount(x: f32) -> String {
    if (x - x.round()).abs() < 1e-6 {
        format!("{}", x.round() as i64)
    } else {
        let s = format!("{x:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn torch(quantity: u32) -> ExtractedItem {
        classify("Torch", quantity)
    }

    fn gain(items: Vec<ExtractedItem>) -> ChangeSet {
        ChangeSet {
            items_gained: items,
            ..Default::default()
        }
    }

    fn lose(items: Vec<ExtractedItem>) -> ChangeSet {
        ChangeSet {
            items_lost: items,
            ..Default::default()
        }
    }

    #[test]
    fn test_gain_inserts_then_merges() {
        let mut ledger = Ledger::new();
        let mut purse = CurrencyPurse::default();

        apply(&mut ledger, &mut purse, &gain(vec![torch(2)]), 10).unwrap();
        apply(&mut ledger, &mut purse, &gain(vec![torch(3)]), 10).unwrap();

        assert_eq!(ledger.entries.len(), 1);
        let entry = ledger.find("torch").unwrap();
        assert_eq!(entry.quantity, 5);
        assert_eq!(entry.total_weight(), entry.weight * 5.0);
        assert_eq!(entry.source, ItemSource::AutoDetected);
    }

    #[test]
    fn test_merge_saturates_at_quantity_ceiling() {
        // A narrative-derived quantity can be any u32 literal; merging two
        // huge gains must clamp, not overflow.
        let mut ledger = Ledger::new();
        let mut purse = CurrencyPurse::default();
        let huge = crate::extract::extract("You find 4294967295 torches.");
        assert_eq!(huge.items_gained[0].quantity, u32::MAX);

        apply(&mut ledger, &mut purse, &huge, 10).unwrap();
        apply(&mut ledger, &mut purse, &huge, 10).unwrap();
        assert_eq!(ledger.find("torch").unwrap().quantity, u32::MAX);

        ledger.add_manual(torch(u32::MAX), "");
        assert_eq!(ledger.find("torch").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_non_ascii_names_merge_and_remove_consistently() {
        let mut ledger = Ledger::new();
        let mut purse = CurrencyPurse::default();

        apply(&mut ledger, &mut purse, &gain(vec![classify("Épée", 1)]), 10).unwrap();
        apply(&mut ledger, &mut purse, &gain(vec![classify("épée", 1)]), 10).unwrap();
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.entries[0].quantity, 2);

        apply(&mut ledger, &mut purse, &lose(vec![classify("épée", 2)]), 10).unwrap();
        assert!(ledger.entries.is_empty());
    }

    #[test]
    fn test_merge_is_case_insensitive() {
        let mut ledger = Ledger::new();
        let mut purse = CurrencyPurse::default();

        apply(&mut ledger, &mut purse, &gain(vec![classify("TORCH", 1)]), 10).unwrap();
        apply(&mut ledger, &mut purse, &gain(vec![classify("torch", 1)]), 10).unwrap();

        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.entries[0].quantity, 2);
    }

    #[test]
    fn test_repeated_loss_is_idempotent() {
        let mut ledger = Ledger::new();
        let mut purse = CurrencyPurse::default();
        apply(&mut ledger, &mut purse, &gain(vec![torch(1)]), 10).unwrap();

        // First loss removes the entry.
        apply(&mut ledger, &mut purse, &lose(vec![torch(1)]), 10).unwrap();
        assert!(ledger.entries.is_empty());

        // Second loss of the now-absent item is a silent no-op.
        let summary = apply(&mut ledger, &mut purse, &lose(vec![torch(1)]), 10).unwrap();
        assert!(ledger.entries.is_empty());
        assert!(summary.lines.is_empty());
    }

    #[test]
    fn test_loss_clamps_to_quantity_on_hand() {
        let mut ledger = Ledger::new();
        let mut purse = CurrencyPurse::default();
        apply(&mut ledger, &mut purse, &gain(vec![torch(2)]), 10).unwrap();

        let summary = apply(&mut ledger, &mut purse, &lose(vec![torch(10)]), 10).unwrap();
        assert!(ledger.entries.is_empty());
        assert_eq!(summary.lines, vec!["-2 Torch"]);
    }

    #[test]
    fn test_currency_floor() {
        let mut ledger = Ledger::new();
        let mut purse = CurrencyPurse::default();

        let changes = ChangeSet {
            money_gained: Coins { gp: 10, ..Default::default() },
            ..Default::default()
        };
        apply(&mut ledger, &mut purse, &changes, 10).unwrap();
        assert_eq!(purse.gp, 10);

        let overdraw = ChangeSet {
            money_lost: Coins { gp: 50, sp: 5, ..Default::default() },
            ..Default::default()
        };
        let summary = apply(&mut ledger, &mut purse, &overdraw, 10).unwrap();
        assert_eq!(purse.gp, 0);
        assert_eq!(purse.sp, 0);
        // Only what was actually removed is reported.
        assert_eq!(summary.lines, vec!["-10 gp"]);
    }

    #[test]
    fn test_malformed_changeset_rejected_without_mutation() {
        let mut ledger = Ledger::new();
        let mut purse = CurrencyPurse::default();
        apply(&mut ledger, &mut purse, &gain(vec![torch(1)]), 10).unwrap();

        let mut bad = torch(1);
        bad.quantity = 0;
        let changes = ChangeSet {
            items_gained: vec![torch(5)],
            items_lost: vec![bad],
            money_gained: Coins { gp: 99, ..Default::default() },
            ..Default::default()
        };

        let err = apply(&mut ledger, &mut purse, &changes, 10).unwrap_err();
        assert!(matches!(err, ChangeSetError::Malformed(_)));
        // Nothing from the rejected set landed.
        assert_eq!(ledger.find("torch").unwrap().quantity, 1);
        assert_eq!(purse.gp, 0);
    }

    #[test]
    fn test_summary_lines_format() {
        let mut ledger = Ledger::new();
        let mut purse = CurrencyPurse::default();
        let changes = ChangeSet {
            items_gained: vec![torch(2)],
            money_gained: Coins { gp: 25, ..Default::default() },
            ..Default::default()
        };
        let summary = apply(&mut ledger, &mut purse, &changes, 10).unwrap();
        assert_eq!(summary.lines, vec!["+2 Torch (2lbs, 0.02gp)", "+25 gp"]);
    }

    #[test]
    fn test_manual_entries_and_equip() {
        let mut ledger = Ledger::new();
        ledger.add_manual(classify("Chain Shirt", 1), "starting gear");
        assert_eq!(ledger.entries[0].source, ItemSource::Manual);

        assert!(ledger.set_equipped("chain shirt", true));
        assert!(ledger.find("Chain Shirt").unwrap().equipped);
        assert!(!ledger.set_equipped("halberd", true));
    }
}
