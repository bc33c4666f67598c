//! Character record facade.
//!
//! The host-owned record the engine mutates in place: the possessions
//! ledger, the coin purse, and the strength score the capacity engine keys
//! on. The host constructs one at character load, persists it however it
//! likes (everything is serde-serializable), and discards it at unload.
//! The engine holds no copies and no global state.

use crate::capacity::{recompute, CapacitySnapshot};
use crate::extract::{extract, ChangeSet};
use crate::ledger::{apply, AppliedSummary, ChangeSetError, CurrencyPurse, Ledger};
use serde::{Deserialize, Serialize};

/// One character's inventory-facing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub strength: u8,
    pub ledger: Ledger,
    pub purse: CurrencyPurse,
}

impl CharacterRecord {
    pub fn new(name: impl Into<String>, strength: u8) -> Self {
        Self {
            name: name.into(),
            strength,
            ledger: Ledger::new(),
            purse: CurrencyPurse::default(),
        }
    }

    /// Extract a change-set from one block of narrative text. Pure: nothing
    /// is applied until the host confirms and calls [`apply_changes`].
    ///
    /// [`apply_changes`]: CharacterRecord::apply_changes
    pub fn review_narration(&self, text: &str) -> ChangeSet {
        extract(text)
    }

    /// Merge a confirmed change-set into the ledger and purse, all or
    /// nothing. The summary carries the post-apply capacity snapshot.
    pub fn apply_changes(&mut self, changes: &ChangeSet) -> Result<AppliedSummary, ChangeSetError> {
        apply(&mut self.ledger, &mut self.purse, changes, self.strength)
    }

    /// Current capacity snapshot, derived on demand.
    pub fn capacity(&self) -> CapacitySnapshot {
        recompute(&self.ledger, self.strength)
    }
}
