//! Ruleset trait and the built-in rulesets.
//!
//! A ruleset decides two things about a round:
//! - which allocations are legal beyond the shared budget check
//! - how committed soldiers turn into points (`ScoringMode`)
//!
//! The scoring itself lives in `scoring::ScoringEngine`; rulesets only
//! describe it, so they stay small and easy to add.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::AllocationViolation;
use crate::round::{Allocation, BattlefieldId, MAX_FIELDS};

/// Stable ruleset identifier, stored with round terms and outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RulesetId(pub u16);

impl RulesetId {
    pub const CLASSIC: RulesetId = RulesetId(0);
    pub const DECREASING_SOLDIERS: RulesetId = RulesetId(1);

    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl fmt::Display for RulesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ruleset({})", self.0)
    }
}

/// How commitments are converted into points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringMode {
    /// The strictly highest commitment on a battlefield wins its value.
    /// Top ties go through the engine's `TiePolicy`.
    WinnerTakesValue,
    /// Against every opponent, a player earns `value * (own - theirs)` on
    /// each battlefield where they committed more.
    Margin,
}

/// Rules a round can be played under.
pub trait Ruleset: fmt::Debug + Send + Sync {
    fn id(&self) -> RulesetId;

    fn name(&self) -> &str;

    /// Rules as shown to players when the round opens.
    fn rules_text(&self) -> &str;

    fn scoring_mode(&self) -> ScoringMode;

    /// Ruleset-specific constraints, checked after the budget check passes.
    fn check_allocation(&self, _allocation: &Allocation) -> Result<(), AllocationViolation> {
        Ok(())
    }
}

/// Standard Colonel Blotto: any split of the budget, winner takes each field.
#[derive(Clone, Copy, Debug, Default)]
pub struct Classic;

impl Ruleset for Classic {
    fn id(&self) -> RulesetId {
        RulesetId::CLASSIC
    }

    fn name(&self) -> &str {
        "Classic"
    }

    fn rules_text(&self) -> &str {
        "Distribute your soldiers across the fields however you like, up to your budget.\n\
         Whoever commits the most soldiers to a field wins that field's points."
    }

    fn scoring_mode(&self) -> ScoringMode {
        ScoringMode::WinnerTakesValue
    }
}

/// Each field may hold no more soldiers than the field before it.
///
/// Scored by margin: on each field the side with more soldiers earns the
/// difference, the other side earns nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecreasingSoldiers;

impl Ruleset for DecreasingSoldiers {
    fn id(&self) -> RulesetId {
        RulesetId::DECREASING_SOLDIERS
    }

    fn name(&self) -> &str {
        "Decreasing Soldiers"
    }

    fn rules_text(&self) -> &str {
        "Each field may hold no more soldiers than the field before it: \
         if Field 1 has 10 soldiers, Field 2 may have at most 10.\n\
         On every field, against every opponent, the side with more soldiers scores \
         the difference and the other side scores 0."
    }

    fn scoring_mode(&self) -> ScoringMode {
        ScoringMode::Margin
    }

    fn check_allocation(&self, allocation: &Allocation) -> Result<(), AllocationViolation> {
        let amounts = allocation.amounts();
        if amounts.len() > MAX_FIELDS {
            return Err(AllocationViolation::FieldCountMismatch {
                expected: MAX_FIELDS,
                actual: amounts.len(),
            });
        }
        for (id, pair) in (1..=u16::MAX).zip(amounts.windows(2)) {
            if pair[1] > pair[0] {
                return Err(AllocationViolation::NotDecreasing {
                    field: BattlefieldId::new(id),
                    amount: pair[1],
                    previous: pair[0],
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_accepts_any_shape() {
        let classic = Classic;
        assert_eq!(classic.id(), RulesetId::CLASSIC);
        assert_eq!(classic.scoring_mode(), ScoringMode::WinnerTakesValue);
        assert!(classic.check_allocation(&Allocation::new([1, 5, 2])).is_ok());
    }

    #[test]
    fn test_decreasing_soldiers_constraint() {
        let rules = DecreasingSoldiers;

        assert!(rules.check_allocation(&Allocation::new([10, 10, 4, 0])).is_ok());
        assert!(rules.check_allocation(&Allocation::new([])).is_ok());
        assert!(rules.check_allocation(&Allocation::new([7])).is_ok());

        assert_eq!(
            rules.check_allocation(&Allocation::new([10, 9, 12])),
            Err(AllocationViolation::NotDecreasing {
                field: BattlefieldId::new(2),
                amount: 12,
                previous: 9,
            })
        );
    }

    #[test]
    fn test_decreasing_soldiers_field_limit() {
        let mut amounts = vec![0u32; MAX_FIELDS];
        amounts[MAX_FIELDS - 1] = 1;
        assert_eq!(
            DecreasingSoldiers.check_allocation(&Allocation::new(amounts)),
            Err(AllocationViolation::NotDecreasing {
                field: BattlefieldId::new(u16::MAX),
                amount: 1,
                previous: 0
            })
        );

        let wide = Allocation::zeroed(MAX_FIELDS + 1);
        assert!(matches!(
            DecreasingSoldiers.check_allocation(&wide),
            Err(AllocationViolation::FieldCountMismatch { actual, .. }) if actual == MAX_FIELDS + 1
        ));
    }

    #[test]
    fn test_ruleset_id_display() {
        assert_eq!(RulesetId::DECREASING_SOLDIERS.to_string(), "Ruleset(1)");
    }
}
