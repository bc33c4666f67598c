//! Testing utilities.
//!
//! Deterministic replacements for the external collaborators: a scripted
//! narrator standing in for the generation service, and a playthrough
//! harness that drives extract -> confirm -> apply one block at a time,
//! the way a live session would.

use crate::character::CharacterRecord;
use crate::extract::ChangeSet;
use crate::ledger::{AppliedSummary, ChangeSetError};

/// A narrative source that returns scripted blocks in order.
///
/// Stands in for the generation service in integration tests; the engine
/// makes no assumptions about its output beyond being text.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNarrator {
    blocks: Vec<String>,
    next: usize,
}

impl ScriptedNarrator {
    pub fn new(blocks: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            blocks: blocks.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }

    /// The next scripted block, or `None` when the script is exhausted.
    pub fn next_block(&mut self) -> Option<String> {
        let block = self.blocks.get(self.next).cloned();
        if block.is_some() {
            self.next += 1;
        }
        block
    }
}

/// Drives the full pipeline over a scripted session.
///
/// Blocks are processed strictly in order, one at a time, because each
/// change-set's effect can depend on the ledger state the previous block
/// left behind (a loss only removes what currently exists).
pub struct PlaythroughHarness {
    pub character: CharacterRecord,
    narrator: ScriptedNarrator,
}

impl PlaythroughHarness {
    pub fn new(character: CharacterRecord, narrator: ScriptedNarrator) -> Self {
        Self { character, narrator }
    }

    /// Run every remaining block through extract -> confirm -> apply.
    ///
    /// `confirm` plays the confirmation UI: it sees each change-set and
    /// returns whether to apply it. Rejected sets are discarded whole.
    pub fn play_all<F>(&mut self, mut confirm: F) -> Result<Vec<AppliedSummary>, ChangeSetError>
    where
        F: FnMut(&ChangeSet) -> bool,
    {
        let mut summaries = Vec::new();
        while let Some(block) = self.narrator.next_block() {
            let changes = self.character.review_narration(&block);
            if changes.is_empty() || !confirm(&changes) {
                continue;
            }
            summaries.push(self.character.apply_changes(&changes)?);
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_session_applies_in_order() {
        let narrator = ScriptedNarrator::new([
            "You find a torch and 5 gold pieces.",
            "The road is long and the rain does not let up.",
            "You drop the torch.",
        ]);
        let mut harness = PlaythroughHarness::new(CharacterRecord::new("Kyra", 12), narrator);

        let summaries = harness.play_all(|_| true).unwrap();
        // The scenery-only block produced an empty change-set and no summary.
        assert_eq!(summaries.len(), 2);
        assert!(harness.character.ledger.entries.is_empty());
        assert_eq!(harness.character.purse.gp, 5);
    }

    #[test]
    fn test_rejected_blocks_leave_no_trace() {
        let narrator = ScriptedNarrator::new(["You find a greatsword.", "You find a dagger."]);
        let mut harness = PlaythroughHarness::new(CharacterRecord::new("Sajan", 10), narrator);

        // Confirm only the second block.
        let mut seen = 0;
        let summaries = harness
            .play_all(|_| {
                seen += 1;
                seen == 2
            })
            .unwrap();

        assert_eq!(summaries.len(), 1);
        assert!(!harness.character.ledger.has_item("Greatsword"));
        assert!(harness.character.ledger.has_item("Dagger"));
    }

    #[test]
    fn test_loss_depends_on_prior_block_state() {
        // The same loss block is a removal the first time and a no-op the
        // second, so blocks must be applied sequentially.
        let narrator = ScriptedNarrator::new([
            "You find a torch.",
            "You drop the torch.",
            "You drop the torch.",
        ]);
        let mut harness = PlaythroughHarness::new(CharacterRecord::new("Ezren", 8), narrator);
        let summaries = harness.play_all(|_| true).unwrap();

        assert!(harness.character.ledger.entries.is_empty());
        // First loss reported a removal; second had nothing to remove.
        assert_eq!(summaries[1].lines, vec!["-1 Torch"]);
        assert!(summaries[2].lines.is_empty());
    }
}
