//! Carrying capacity and encumbrance.
//!
//! Derives the active encumbrance tier and its speed/skill/Dex penalties
//! from total carried weight and a strength-indexed capacity table. The
//! snapshot is purely a function of current ledger weight and strength:
//! no hidden state, re-derivable at any time.

use crate::ledger::Ledger;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Load tier derived from carried weight vs strength capacity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EncumbranceTier {
    Unencumbered,
    Light,
    Medium,
    Heavy,
    Overloaded,
}

impl EncumbranceTier {
    /// Speed reduction in feet.
    pub fn speed_penalty(&self) -> u32 {
        match self {
            EncumbranceTier::Unencumbered | EncumbranceTier::Light => 0,
            EncumbranceTier::Medium => 10,
            EncumbranceTier::Heavy => 20,
            EncumbranceTier::Overloaded => 30,
        }
    }

    /// Armor-check-style penalty applied to strength/dex skill checks.
    pub fn skill_check_penalty(&self) -> i32 {
        match self {
            EncumbranceTier::Unencumbered | EncumbranceTier::Light => 0,
            EncumbranceTier::Medium => -3,
            EncumbranceTier::Heavy => -6,
            EncumbranceTier::Overloaded => -10,
        }
    }

    /// Cap on the Dex bonus to AC; `None` means uncapped.
    pub fn max_dex_bonus(&self) -> Option<i32> {
        match self {
            EncumbranceTier::Unencumbered | EncumbranceTier::Light => None,
            EncumbranceTier::Medium => Some(3),
            EncumbranceTier::Heavy => Some(1),
            EncumbranceTier::Overloaded => Some(0),
        }
    }

    pub fn can_run(&self) -> bool {
        matches!(
            self,
            EncumbranceTier::Unencumbered | EncumbranceTier::Light | EncumbranceTier::Medium
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            EncumbranceTier::Unencumbered => "unencumbered",
            EncumbranceTier::Light => "light",
            EncumbranceTier::Medium => "medium",
            EncumbranceTier::Heavy => "heavy",
            EncumbranceTier::Overloaded => "overloaded",
        }
    }
}

impl fmt::Display for EncumbranceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Derived physical-capacity statistics. Never stored independently of the
/// ledger it was computed from; recompute whenever the ledger changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    pub total_weight: f32,
    pub tier: EncumbranceTier,
    pub speed_penalty: u32,
    pub skill_check_penalty: i32,
    pub max_dex_bonus: Option<i32>,
    pub can_run: bool,
}

/// Light/medium/heavy load ceilings in pounds, indexed by strength 1-29.
const CAPACITY_TABLE: [(f32, f32, f32); 29] = [
    (3.0, 6.0, 10.0),       // 1
    (6.0, 13.0, 20.0),      // 2
    (10.0, 20.0, 30.0),     // 3
    (13.0, 26.0, 40.0),     // 4
    (16.0, 33.0, 50.0),     // 5
    (20.0, 40.0, 60.0),     // 6
    (23.0, 46.0, 70.0),     // 7
    (26.0, 53.0, 80.0),     // 8
    (30.0, 60.0, 90.0),     // 9
    (33.0, 66.0, 100.0),    // 10
    (38.0, 76.0, 115.0),    // 11
    (43.0, 86.0, 130.0),    // 12
    (50.0, 100.0, 150.0),   // 13
    (58.0, 116.0, 175.0),   // 14
    (66.0, 133.0, 200.0),   // 15
    (76.0, 153.0, 230.0),   // 16
    (86.0, 173.0, 260.0),   // 17
    (100.0, 200.0, 300.0),  // 18
    (116.0, 233.0, 350.0),  // 19
    (133.0, 266.0, 400.0),  // 20
    (153.0, 306.0, 460.0),  // 21
    (173.0, 346.0, 520.0),  // 22
    (200.0, 400.0, 600.0),  // 23
    (233.0, 466.0, 700.0),  // 24
    (266.0, 533.0, 800.0),  // 25
    (306.0, 613.0, 920.0),  // 26
    (346.0, 693.0, 1040.0), // 27
    (400.0, 800.0, 1200.0), // 28
    (466.0, 933.0, 1400.0), // 29
];

/// Light/medium/heavy ceilings for a strength score. Scores above 29 use
/// the Pathfinder extension: the row for (score - 10), quadrupled.
pub fn carrying_capacity(strength: u8) -> (f32, f32, f32) {
    let strength = strength.max(1);
    if strength > 29 {
        let (light, medium, heavy) = carrying_capacity(strength - 10);
        (light * 4.0, medium * 4.0, heavy * 4.0)
    } else {
        CAPACITY_TABLE[strength as usize - 1]
    }
}

/// Derive the capacity snapshot for the current ledger and strength score.
pub fn recompute(ledger: &Ledger, strength: u8) -> CapacitySnapshot {
    let total_weight = ledger.total_weight();
    let (light, medium, heavy) = carrying_capacity(strength);

    let tier = if total_weight <= 0.0 {
        EncumbranceTier::Unencumbered
    } else if total_weight <= light {
        EncumbranceTier::Light
    } else if total_weight <= medium {
        EncumbranceTier::Medium
    } else if total_weight <= heavy {
        EncumbranceTier::Heavy
    } else {
        EncumbranceTier::Overloaded
    };

    CapacitySnapshot {
        total_weight,
        tier,
        speed_penalty: tier.speed_penalty(),
        skill_check_penalty: tier.skill_check_penalty(),
        max_dex_bonus: tier.max_dex_bonus(),
        can_run: tier.can_run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::ledger::Ledger;

    fn ledger_weighing(pounds: f32) -> Ledger {
        let mut ledger = Ledger::new();
        let mut item = classify("Iron Ingot", 1);
        item.weight = pounds;
        ledger.add_manual(item, "");
        ledger
    }

    #[test]
    fn test_empty_ledger_is_unencumbered() {
        let snapshot = recompute(&Ledger::new(), 10);
        assert_eq!(snapshot.tier, EncumbranceTier::Unencumbered);
        assert_eq!(snapshot.speed_penalty, 0);
        assert_eq!(snapshot.max_dex_bonus, None);
        assert!(snapshot.can_run);
    }

    #[test]
    fn test_tier_thresholds_at_strength_ten() {
        // Strength 10: light 33, medium 66, heavy 100.
        assert_eq!(recompute(&ledger_weighing(33.0), 10).tier, EncumbranceTier::Light);
        assert_eq!(recompute(&ledger_weighing(34.0), 10).tier, EncumbranceTier::Medium);
        assert_eq!(recompute(&ledger_weighing(66.0), 10).tier, EncumbranceTier::Medium);
        assert_eq!(recompute(&ledger_weighing(100.0), 10).tier, EncumbranceTier::Heavy);
        assert_eq!(recompute(&ledger_weighing(101.0), 10).tier, EncumbranceTier::Overloaded);
    }

    #[test]
    fn test_penalty_triples() {
        let medium = recompute(&ledger_weighing(50.0), 10);
        assert_eq!(
            (medium.speed_penalty, medium.skill_check_penalty, medium.max_dex_bonus),
            (10, -3, Some(3))
        );

        let heavy = recompute(&ledger_weighing(90.0), 10);
        assert_eq!(
            (heavy.speed_penalty, heavy.skill_check_penalty, heavy.max_dex_bonus),
            (20, -6, Some(1))
        );
        assert!(!heavy.can_run);

        let overloaded = recompute(&ledger_weighing(500.0), 10);
        assert_eq!(
            (
                overloaded.speed_penalty,
                overloaded.skill_check_penalty,
                overloaded.max_dex_bonus
            ),
            (30, -10, Some(0))
        );
    }

    #[test]
    fn test_penalties_monotonic_in_weight() {
        let mut last_penalty = 0;
        for pounds in [0.0, 10.0, 33.0, 50.0, 80.0, 100.0, 150.0, 1000.0] {
            let snapshot = recompute(&ledger_weighing(pounds), 10);
            assert!(
                snapshot.speed_penalty >= last_penalty,
                "penalty decreased at {pounds}lbs"
            );
            last_penalty = snapshot.speed_penalty;
        }
    }

    #[test]
    fn test_stronger_characters_carry_more() {
        let ledger = ledger_weighing(150.0);
        assert_eq!(recompute(&ledger, 10).tier, EncumbranceTier::Overloaded);
        assert_eq!(recompute(&ledger, 18).tier, EncumbranceTier::Medium);
    }

    #[test]
    fn test_capacity_above_table_quadruples() {
        let (light, _, heavy) = carrying_capacity(30);
        // Strength 30 uses the strength-20 row times four.
        assert_eq!(light, 133.0 * 4.0);
        assert_eq!(heavy, 400.0 * 4.0);
    }

    #[test]
    fn test_strength_zero_clamps_to_one() {
        assert_eq!(carrying_capacity(0), carrying_capacity(1));
    }
}
