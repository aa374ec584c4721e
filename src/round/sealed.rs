//! Sealed rounds: complete, validated, immutable.

use std::sync::Arc;

use super::allocation::Allocation;
use super::open::{check_allocation, MIN_PLAYERS};
use super::terms::RoundTerms;
use crate::core::{BlottoError, PlayerId, PlayerMap, Result};
use crate::rules::Ruleset;

/// A complete round, ready for scoring.
///
/// Every participant has exactly one allocation and every allocation has
/// passed the budget and ruleset checks. There are no mutators, so scoring
/// the same `SealedRound` twice always sees the same input.
#[derive(Clone, Debug)]
pub struct SealedRound {
    number: u32,
    terms: RoundTerms,
    ruleset: Arc<dyn Ruleset>,
    budgets: PlayerMap<u32>,
    allocations: PlayerMap<Allocation>,
}

impl SealedRound {
    /// Build a sealed round directly from allocations, validating each.
    ///
    /// All players get `terms.budget`. Fails with `InvalidAllocation` for the
    /// first offending player, `RulesetMismatch` if `ruleset` is not the
    /// one the terms name, or `TooFewPlayers` for a one-player round.
    pub fn new(
        number: u32,
        terms: RoundTerms,
        ruleset: Arc<dyn Ruleset>,
        allocations: PlayerMap<Allocation>,
    ) -> Result<Self> {
        let budgets = PlayerMap::with_value(allocations.player_count(), terms.budget);
        Self::with_budgets(number, terms, ruleset, budgets, allocations)
    }

    /// Like [`SealedRound::new`] with a budget per player.
    pub fn with_budgets(
        number: u32,
        terms: RoundTerms,
        ruleset: Arc<dyn Ruleset>,
        budgets: PlayerMap<u32>,
        allocations: PlayerMap<Allocation>,
    ) -> Result<Self> {
        if ruleset.id() != terms.ruleset {
            return Err(BlottoError::RulesetMismatch {
                expected: terms.ruleset,
                actual: ruleset.id(),
            });
        }
        if allocations.player_count() < MIN_PLAYERS {
            return Err(BlottoError::TooFewPlayers {
                required: MIN_PLAYERS,
                actual: allocations.player_count(),
            });
        }
        if budgets.player_count() != allocations.player_count() {
            return Err(BlottoError::PlayerCountMismatch {
                expected: allocations.player_count(),
                actual: budgets.player_count(),
            });
        }
        for (player, allocation) in allocations.iter() {
            check_allocation(&terms, ruleset.as_ref(), player, budgets[player], allocation)?;
        }
        Ok(Self::from_parts(number, terms, ruleset, budgets, allocations))
    }

    /// Assemble from parts that were already validated by an open round.
    pub(crate) fn from_parts(
        number: u32,
        terms: RoundTerms,
        ruleset: Arc<dyn Ruleset>,
        budgets: PlayerMap<u32>,
        allocations: PlayerMap<Allocation>,
    ) -> Self {
        Self {
            number,
            terms,
            ruleset,
            budgets,
            allocations,
        }
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn terms(&self) -> &RoundTerms {
        &self.terms
    }

    #[must_use]
    pub fn ruleset(&self) -> &dyn Ruleset {
        self.ruleset.as_ref()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.allocations.player_count()
    }

    #[must_use]
    pub fn budget(&self, player: PlayerId) -> u32 {
        self.budgets[player]
    }

    #[must_use]
    pub fn allocation(&self, player: PlayerId) -> &Allocation {
        &self.allocations[player]
    }

    #[must_use]
    pub fn allocations(&self) -> &PlayerMap<Allocation> {
        &self.allocations
    }
}
