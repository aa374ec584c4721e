//! The fixed terms a round is played under.

use serde::{Deserialize, Serialize};

use super::allocation::Allocation;
use super::battlefield::{Battlefield, BattlefieldId, MAX_FIELDS};
use crate::core::AllocationViolation;
use crate::rules::RulesetId;

/// Battlefields, default budget, and ruleset of one round.
///
/// ## Example
///
/// ```
/// use rust_blotto::round::RoundTerms;
/// use rust_blotto::rules::RulesetId;
///
/// let terms = RoundTerms::new(RulesetId::CLASSIC, 10)
///     .with_battlefield("Bridge", 2)
///     .with_battlefield("Ford", 1);
///
/// assert_eq!(terms.field_count(), 2);
/// assert_eq!(terms.total_value(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundTerms {
    pub ruleset: RulesetId,
    pub battlefields: Vec<Battlefield>,
    /// Soldiers each player may commit, unless the round overrides it.
    pub budget: u32,
}

impl RoundTerms {
    /// Terms with no battlefields yet.
    #[must_use]
    pub fn new(ruleset: RulesetId, budget: u32) -> Self {
        Self {
            ruleset,
            battlefields: Vec::new(),
            budget,
        }
    }

    /// `fields` battlefields worth 1 point each.
    #[must_use]
    pub fn uniform(ruleset: RulesetId, fields: u16, budget: u32) -> Self {
        Self {
            ruleset,
            battlefields: (0..fields)
                .map(|i| Battlefield::new(BattlefieldId::new(i)))
                .collect(),
            budget,
        }
    }

    /// Append a battlefield; its id is its position.
    ///
    /// # Panics
    ///
    /// Panics if the terms already hold [`MAX_FIELDS`] battlefields.
    #[must_use]
    pub fn with_battlefield(mut self, label: impl Into<String>, value: u32) -> Self {
        let id = match u16::try_from(self.battlefields.len()) {
            Ok(position) => BattlefieldId::new(position),
            Err(_) => panic!("At most {MAX_FIELDS} battlefields supported"),
        };
        self.battlefields
            .push(Battlefield::new(id).with_label(label).with_value(value));
        self
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.battlefields.len()
    }

    /// Sum of all battlefield values: the most a round can award.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.battlefields.iter().map(|b| u64::from(b.value)).sum()
    }

    /// Structural check shared by every ruleset: field count and budget.
    pub fn check_allocation(
        &self,
        allocation: &Allocation,
        budget: u32,
    ) -> Result<(), AllocationViolation> {
        allocation.check(self.field_count(), budget)
    }
}
