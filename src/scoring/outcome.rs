//! Scored results: per-battlefield outcomes, round scores and ranks.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, PlayerMap, Result};
use crate::round::BattlefieldId;
use crate::rules::RulesetId;

/// Who took a battlefield.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldResult {
    /// One player committed strictly more than everyone else.
    Won(PlayerId),
    /// Several players share the top commitment.
    Tied(SmallVec<[PlayerId; 4]>),
    /// Nobody committed anything.
    Uncontested,
}

/// Result of a single battlefield.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattlefieldOutcome {
    pub battlefield: BattlefieldId,
    pub value: u32,
    /// Highest commitment anyone made here.
    pub top_commitment: u32,
    pub result: FieldResult,
    /// Points handed out on this battlefield across all players.
    pub awarded: u64,
}

impl BattlefieldOutcome {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.result {
            FieldResult::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// One player's place in a ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub score: u64,
    /// 1-based competition rank: equal scores share a rank, and the next
    /// rank skips accordingly (1, 2, 2, 4).
    pub rank: u32,
}

/// Scored round. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub ruleset: RulesetId,
    pub battlefields: Vec<BattlefieldOutcome>,
    pub scores: PlayerMap<u64>,
    pub ranks: PlayerMap<u32>,
}

impl RoundOutcome {
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.scores.player_count()
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u64 {
        self.scores[player]
    }

    /// Points handed out across all battlefields, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_awarded(&self) -> u64 {
        self.battlefields
            .iter()
            .fold(0u64, |acc, b| acc.saturating_add(b.awarded))
    }

    /// Battlefields won outright by `player`.
    #[must_use]
    pub fn fields_won(&self, player: PlayerId) -> Vec<BattlefieldId> {
        self.battlefields
            .iter()
            .filter(|b| b.winner() == Some(player))
            .map(|b| b.battlefield)
            .collect()
    }

    /// Players sorted by rank, then id.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        standings(&self.scores, &self.ranks)
    }

    /// Everyone ranked first.
    #[must_use]
    pub fn leaders(&self) -> Vec<PlayerId> {
        self.ranks
            .iter()
            .filter(|&(_, &rank)| rank == 1)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Competition ranking by descending score.
///
/// ```
/// use rust_blotto::core::PlayerMap;
/// use rust_blotto::scoring::competition_ranks;
///
/// let ranks = competition_ranks(&PlayerMap::from_vec(vec![5, 9, 5, 1]));
/// assert_eq!(ranks.values().copied().collect::<Vec<_>>(), vec![2, 1, 2, 4]);
/// ```
#[must_use]
pub fn competition_ranks(scores: &PlayerMap<u64>) -> PlayerMap<u32> {
    scores.map(|_, &score| {
        let ahead = scores.values().filter(|&&other| other > score).count();
        ahead as u32 + 1
    })
}

pub(crate) fn standings(scores: &PlayerMap<u64>, ranks: &PlayerMap<u32>) -> Vec<Standing> {
    let mut out: Vec<Standing> = scores
        .iter()
        .map(|(player, &score)| Standing {
            player,
            score,
            rank: ranks[player],
        })
        .collect();
    out.sort_by_key(|s| (s.rank, s.player));
    out
}
