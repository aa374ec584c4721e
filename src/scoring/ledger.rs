//! Cumulative scores across rounds.
//!
//! `ScoreLedger` is a value, not a service: `record` returns a new ledger and
//! leaves the old one untouched. Both share structure through `im`, so keeping
//! every version around (for replays or undo) costs O(1) per clone.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::outcome::{competition_ranks, standings, RoundOutcome, Standing};
use crate::core::{BlottoError, PlayerId, PlayerMap, Result};

/// Recorded round outcomes plus running totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    player_count: usize,
    /// Outcomes keyed by round number.
    outcomes: OrdMap<u32, RoundOutcome>,
    /// Running total per player, indexed by `PlayerId::index`.
    totals: Vector<u64>,
}

impl ScoreLedger {
    /// Empty ledger for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            outcomes: OrdMap::new(),
            totals: std::iter::repeat(0).take(player_count).collect(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// A new ledger with `outcome` added.
    ///
    /// Fails with `RoundAlreadyRecorded` if that round number is already in
    /// the ledger, or `PlayerCountMismatch` if the outcome was scored for a
    /// different number of players.
    pub fn record(&self, outcome: &RoundOutcome) -> Result<Self> {
        if self.outcomes.contains_key(&outcome.round) {
            return Err(BlottoError::RoundAlreadyRecorded(outcome.round));
        }
        if outcome.player_count() != self.player_count {
            return Err(BlottoError::PlayerCountMismatch {
                expected: self.player_count,
                actual: outcome.player_count(),
            });
        }

        let mut next = self.clone();
        for (player, &score) in outcome.scores.iter() {
            let total = &mut next.totals[player.index()];
            *total = total.saturating_add(score);
        }
        next.outcomes.insert(outcome.round, outcome.clone());

        debug!(round = outcome.round, recorded = next.outcomes.len(), "round recorded");
        Ok(next)
    }

    /// Cumulative score for `player`, 0 for unknown players. Saturates at
    /// `u64::MAX`.
    #[must_use]
    pub fn total(&self, player: PlayerId) -> u64 {
        self.totals.get(player.index()).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn totals(&self) -> PlayerMap<u64> {
        PlayerMap::new(self.player_count, |p| self.total(p))
    }

    /// What `player` scored in `round`, if that round was recorded.
    #[must_use]
    pub fn round_result(&self, round: u32, player: PlayerId) -> Option<u64> {
        self.outcomes
            .get(&round)
            .and_then(|outcome| outcome.scores.get(player).copied())
    }

    #[must_use]
    pub fn outcome(&self, round: u32) -> Option<&RoundOutcome> {
        self.outcomes.get(&round)
    }

    /// Recorded outcomes in round order.
    pub fn rounds(&self) -> impl Iterator<Item = &RoundOutcome> {
        self.outcomes.values()
    }

    #[must_use]
    pub fn round_count(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Cumulative totals with competition ranks, sorted by rank then id.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let totals = self.totals();
        standings(&totals, &competition_ranks(&totals))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
