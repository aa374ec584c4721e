//! Round scoring.
//!
//! `ScoringEngine::score` is a pure function of the sealed round and the
//! engine's tie policy: no state is kept between calls, so re-scoring the
//! same round always produces the same outcome.
//!
//! ## Winner-takes-value
//!
//! On each battlefield the strictly highest commitment wins the full value.
//! A battlefield where nobody committed anything is uncontested and awards
//! nothing. A top tie is handled by `TiePolicy`:
//! - `Reject`: fail with `AmbiguousTie`
//! - `Split`: each tied player gets `value / tied`, remainder unawarded
//! - `Void`: nobody scores
//!
//! ## Margin
//!
//! Every player is compared with every opponent on every battlefield and
//! earns `value * (own - theirs)` whenever `own > theirs`. Equal commitments
//! earn nothing for either side, so no tie policy is involved.

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::outcome::{competition_ranks, BattlefieldOutcome, FieldResult, RoundOutcome};
use crate::core::{BlottoError, EngineConfig, PlayerId, PlayerMap, Result, TiePolicy};
use crate::round::{Battlefield, SealedRound};
use crate::rules::ScoringMode;

/// Scores sealed rounds.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_blotto::core::{PlayerId, PlayerMap};
/// use rust_blotto::round::{Allocation, RoundTerms, SealedRound};
/// use rust_blotto::rules::{Classic, RulesetId};
/// use rust_blotto::scoring::ScoringEngine;
///
/// let terms = RoundTerms::uniform(RulesetId::CLASSIC, 3, 5);
/// let allocations = PlayerMap::from_vec(vec![
///     Allocation::new([2, 2, 1]),
///     Allocation::new([1, 1, 3]),
/// ]);
/// let round = SealedRound::new(1, terms, Arc::new(Classic), allocations).unwrap();
///
/// let outcome = ScoringEngine::default().score(&round).unwrap();
/// assert_eq!(outcome.score(PlayerId::new(0)), 2);
/// assert_eq!(outcome.score(PlayerId::new(1)), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoringEngine {
    tie_policy: TiePolicy,
}

impl ScoringEngine {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tie_policy: config.tie_policy,
        }
    }

    #[must_use]
    pub fn with_tie_policy(mut self, policy: TiePolicy) -> Self {
        self.tie_policy = policy;
        self
    }

    #[must_use]
    pub fn tie_policy(&self) -> TiePolicy {
        self.tie_policy
    }

    pub fn score(&self, round: &SealedRound) -> Result<RoundOutcome> {
        let mode = round.ruleset().scoring_mode();
        let mut scores = PlayerMap::with_value(round.player_count(), 0u64);
        let mut battlefields = Vec::with_capacity(round.terms().field_count());

        for field in &round.terms().battlefields {
            let outcome = match mode {
                ScoringMode::WinnerTakesValue => self.winner_takes_value(round, field, &mut scores)?,
                ScoringMode::Margin => margin(round, field, &mut scores),
            };
            battlefields.push(outcome);
        }

        let ranks = competition_ranks(&scores);
        debug!(
            round = round.number(),
            ruleset = %round.ruleset().id(),
            players = round.player_count(),
            "round scored"
        );

        Ok(RoundOutcome {
            round: round.number(),
            ruleset: round.ruleset().id(),
            battlefields,
            scores,
            ranks,
        })
    }

    fn winner_takes_value(
        &self,
        round: &SealedRound,
        field: &Battlefield,
        scores: &mut PlayerMap<u64>,
    ) -> Result<BattlefieldOutcome> {
        let (top, leaders) = contest(round, field);
        let value = u64::from(field.value);

        let (result, awarded) = match leaders.as_slice() {
            _ if top == 0 => (FieldResult::Uncontested, 0),
            [winner] => {
                scores[*winner] += value;
                (FieldResult::Won(*winner), value)
            }
            tied => match self.tie_policy {
                TiePolicy::Reject => {
                    warn!(
                        round = round.number(),
                        battlefield = %field.id,
                        commitment = top,
                        "top commitment tied with no tie policy"
                    );
                    return Err(BlottoError::AmbiguousTie {
                        round: round.number(),
                        battlefield: field.id,
                        commitment: top,
                        players: tied.to_vec(),
                    });
                }
                TiePolicy::Split => {
                    let share = value / tied.len() as u64;
                    for &player in tied {
                        scores[player] += share;
                    }
                    debug!(battlefield = %field.id, share, "tie split");
                    (FieldResult::Tied(leaders.clone()), share * tied.len() as u64)
                }
                TiePolicy::Void => {
                    debug!(battlefield = %field.id, "tie voided");
                    (FieldResult::Tied(leaders.clone()), 0)
                }
            },
        };

        Ok(BattlefieldOutcome {
            battlefield: field.id,
            value: field.value,
            top_commitment: top,
            result,
            awarded,
        })
    }
}

fn margin(round: &SealedRound, field: &Battlefield, scores: &mut PlayerMap<u64>) -> BattlefieldOutcome {
    let (top, leaders) = contest(round, field);
    let value = u64::from(field.value);
    let allocations = round.allocations();
    let mut awarded = 0u64;

    for (player, allocation) in allocations.iter() {
        let own = allocation.get(field.id);
        let lead: u64 = allocations
            .values()
            .map(|other| u64::from(own.saturating_sub(other.get(field.id))))
            .sum();
        let earned = lead.saturating_mul(value);
        scores[player] = scores[player].saturating_add(earned);
        awarded = awarded.saturating_add(earned);
    }

    let result = match leaders.as_slice() {
        _ if top == 0 => FieldResult::Uncontested,
        [winner] => FieldResult::Won(*winner),
        _ => FieldResult::Tied(leaders.clone()),
    };

    BattlefieldOutcome {
        battlefield: field.id,
        value: field.value,
        top_commitment: top,
        result,
        awarded,
    }
}

/// Highest commitment on a battlefield and everyone who made it.
fn contest(round: &SealedRound, field: &Battlefield) -> (u32, SmallVec<[PlayerId; 4]>) {
    let mut top = 0;
    let mut leaders = SmallVec::new();

    for (player, allocation) in round.allocations().iter() {
        let amount = allocation.get(field.id);
        if amount > top || leaders.is_empty() {
            top = amount;
            leaders.clear();
            leaders.push(player);
        } else if amount == top {
            leaders.push(player);
        }
    }

    (top, leaders)
}
