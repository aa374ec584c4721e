//! Open rounds: collecting submissions.
//!
//! A `Round` accepts submissions until it is sealed. Every submission is
//! validated on arrival, so an invalid allocation is rejected immediately
//! and the player can resubmit. A later valid submission replaces the
//! earlier one; only the last counts.

use std::sync::Arc;

use tracing::debug;

use super::allocation::Allocation;
use super::sealed::SealedRound;
use super::terms::RoundTerms;
use crate::core::{BlottoError, PlayerId, PlayerMap, Result};
use crate::rules::{Ruleset, RulesetLibrary};

/// Fewest players a round can be played with.
pub const MIN_PLAYERS: usize = 2;

/// A round that is still collecting allocations.
#[derive(Clone, Debug)]
pub struct Round {
    number: u32,
    terms: RoundTerms,
    ruleset: Arc<dyn Ruleset>,
    budgets: PlayerMap<u32>,
    submissions: PlayerMap<Option<Allocation>>,
}

impl Round {
    /// Open round `number` for `player_count` players.
    ///
    /// Every player's budget starts at `terms.budget`. Fails with
    /// `TooFewPlayers` below [`MIN_PLAYERS`].
    pub fn open(
        number: u32,
        terms: RoundTerms,
        library: &RulesetLibrary,
        player_count: usize,
    ) -> Result<Self> {
        if player_count < MIN_PLAYERS {
            return Err(BlottoError::TooFewPlayers {
                required: MIN_PLAYERS,
                actual: player_count,
            });
        }
        let ruleset = library.get(terms.ruleset)?;
        Ok(Self {
            number,
            budgets: PlayerMap::with_value(player_count, terms.budget),
            submissions: PlayerMap::with_default(player_count),
            terms,
            ruleset,
        })
    }

    /// Give one player a different budget for this round.
    pub fn set_budget(&mut self, player: PlayerId, budget: u32) -> Result<()> {
        let slot = self
            .budgets
            .get_mut(player)
            .ok_or(BlottoError::UnknownPlayer(player))?;
        *slot = budget;
        Ok(())
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
    pub fn ruleset(&self) -> &Arc<dyn Ruleset> {
        &self.ruleset
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.submissions.player_count()
    }

    #[must_use]
    pub fn budget(&self, player: PlayerId) -> Option<u32> {
        self.budgets.get(player).copied()
    }

    /// Validate an allocation for `player` without recording it.
    pub fn check(&self, player: PlayerId, allocation: &Allocation) -> Result<()> {
        let budget = self.budget(player).ok_or(BlottoError::UnknownPlayer(player))?;
        check_allocation(&self.terms, self.ruleset.as_ref(), player, budget, allocation)
    }

    /// Record a submission, replacing any earlier one.
    ///
    /// Returns the replaced allocation, if there was one.
    pub fn submit(&mut self, player: PlayerId, allocation: Allocation) -> Result<Option<Allocation>> {
        self.check(player, &allocation)?;
        let previous = self.submissions[player].replace(allocation);
        debug!(
            round = self.number,
            %player,
            replaced = previous.is_some(),
            "allocation accepted"
        );
        Ok(previous)
    }

    pub fn withdraw(&mut self, player: PlayerId) -> Option<Allocation> {
        self.submissions.get_mut(player).and_then(Option::take)
    }

    #[must_use]
    pub fn submission(&self, player: PlayerId) -> Option<&Allocation> {
        self.submissions.get(player).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn has_submitted(&self, player: PlayerId) -> bool {
        self.submission(player).is_some()
    }

    /// Players who have not submitted yet, in id order.
    #[must_use]
    pub fn missing(&self) -> Vec<PlayerId> {
        self.submissions
            .iter()
            .filter(|(_, s)| s.is_none())
            .map(|(p, _)| p)
            .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.submissions.values().all(Option::is_some)
    }

    /// Latest submissions, `None` where a player has not submitted.
    #[must_use]
    pub fn submissions(&self) -> &PlayerMap<Option<Allocation>> {
        &self.submissions
    }

    /// Freeze the round for scoring.
    ///
    /// Fails with `IncompleteRound` if anyone has not submitted; the round
    /// stays open so late submissions can still arrive.
    pub fn seal(&self) -> Result<SealedRound> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(BlottoError::IncompleteRound {
                round: self.number,
                missing,
            });
        }
        let allocations = self
            .submissions
            .map(|_, s| s.clone().unwrap_or_default());
        Ok(SealedRound::from_parts(
            self.number,
            self.terms.clone(),
            Arc::clone(&self.ruleset),
            self.budgets.clone(),
            allocations,
        ))
    }

    /// Freeze the round, entering every missing player with all zeros.
    pub fn seal_with_forfeits(&self) -> Result<SealedRound> {
        let fields = self.terms.field_count();
        let mut allocations = PlayerMap::new(self.player_count(), |_| Allocation::zeroed(fields));

        for (player, slot) in allocations.iter_mut() {
            match &self.submissions[player] {
                Some(allocation) => *slot = allocation.clone(),
                None => {
                    debug!(round = self.number, %player, "forfeit: no submission");
                    self.check(player, slot)?;
                }
            }
        }

        Ok(SealedRound::from_parts(
            self.number,
            self.terms.clone(),
            Arc::clone(&self.ruleset),
            self.budgets.clone(),
            allocations,
        ))
    }
}

/// Shared validation: structure and budget first, then ruleset constraints.
pub(crate) fn check_allocation(
    terms: &RoundTerms,
    ruleset: &dyn Ruleset,
    player: PlayerId,
    budget: u32,
    allocation: &Allocation,
) -> Result<()> {
    terms
        .check_allocation(allocation, budget)
        .and_then(|()| ruleset.check_allocation(allocation))
        .map_err(|violation| BlottoError::invalid_allocation(player, violation))
}
