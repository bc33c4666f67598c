//! Inventory and economy rules engine for AI-narrated Pathfinder 1e play.
//!
//! This crate turns free-form narrative text (produced by an AI narrator)
//! into structured changes to a character's equipment and coin, then derives
//! the mechanical consequences:
//! - Pattern-based extraction of item and currency transfers
//! - Classification and pricing against Pathfinder 1e rules tables
//! - All-or-nothing application to a possessions ledger and coin purse
//! - Carrying capacity, encumbrance tier, and speed/Dex penalties
//!
//! The engine is a pure in-process library: no I/O, no async, no global
//! state. The narrative source, confirmation UI, and persistence are host
//! collaborators at the boundary.
//!
//! # Quick Start
//!
//! ```
//! use quartermaster::CharacterRecord;
//!
//! let mut pc = CharacterRecord::new("Valeros", 14);
//!
//! let changes = pc.review_narration("You find a torch and 5 gold pieces.");
//! // ... host shows the change-set to the player for confirmation ...
//! let summary = pc.apply_changes(&changes).unwrap();
//!
//! assert_eq!(pc.purse.gp, 5);
//! assert!(summary.capacity.can_run);
//! ```
//!
//! Extraction is best-effort and intentionally over-generates on ambiguous
//! phrasing; the confirmation step between [`CharacterRecord::review_narration`]
//! and [`CharacterRecord::apply_changes`] is the correctness backstop.

pub mod capacity;
pub mod character;
pub mod classify;
pub mod extract;
pub mod ledger;
pub mod normalize;
pub mod patterns;
pub mod tables;
pub mod testing;

// Primary public API
pub use capacity::{carrying_capacity, recompute, CapacitySnapshot, EncumbranceTier};
pub use character::CharacterRecord;
pub use classify::{classify, Category, ExtractedItem, Rarity};
pub use extract::{extract, ChangeSet, Coins};
pub use ledger::{
    apply, AppliedSummary, ChangeSetError, CurrencyPurse, ItemSource, Ledger, LedgerEntry,
};
pub use normalize::{normalize_phrase, NormalizedPhrase};
pub use patterns::{EventClass, ExtractionRule};
