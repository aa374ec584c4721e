//! Scoring: sealed rounds in, outcomes and cumulative standings out.
//!
//! - `ScoringEngine`: pure scoring of one `SealedRound`
//! - `RoundOutcome`: per-battlefield results, scores and ranks of one round
//! - `ScoreLedger`: persistent running totals across rounds

pub mod engine;
pub mod ledger;
pub mod outcome;

pub use engine::ScoringEngine;
pub use ledger::ScoreLedger;
pub use outcome::{competition_ranks, BattlefieldOutcome, FieldResult, RoundOutcome, Standing};
