//! # rust-blotto
//!
//! A Colonel Blotto tournament engine: players split a soldier budget across
//! battlefields, and each battlefield goes to whoever committed the most.
//!
//! ## Design Principles
//!
//! 1. **Scoring Is Pure**: `ScoringEngine::score` is a function of a sealed
//!    round and the tie policy. No hidden state, no global scoreboard.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    Two players is just the smallest case.
//!
//! 3. **Validate at the Door**: Allocations are checked against the budget
//!    and the ruleset when submitted, never clamped or repaired later.
//!
//! ## Architecture
//!
//! - **Submit, Seal, Score**: An open `Round` collects allocations; sealing
//!   it freezes a `SealedRound`, the only input the scoring engine accepts.
//!
//! - **Persistent Ledger**: Cumulative scores live in a `ScoreLedger` built on
//!   `im-rs`; recording a round returns a new ledger and the old one is kept.
//!
//! - **Deterministic Schedules**: Tournament rounds are drawn from a seeded
//!   ChaCha8 RNG, so a seed and a config always reproduce the same rounds.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `round`: Battlefields, allocations, open and sealed rounds
//! - `rules`: `Ruleset` trait, built-in rulesets, round generation
//! - `scoring`: Scoring engine, round outcomes, score ledger
//! - `tournament`: Signup, round progression, snapshots

pub mod core;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod tournament;

// Re-export commonly used types
pub use crate::core::{
    AllocationViolation, BlottoError, Result,
    EngineConfig, GeneratorConfig, TournamentConfig,
    MissingSubmissionPolicy, TiePolicy,
    GameRng, GameRngState,
    PlayerId, PlayerMap,
};

pub use crate::round::{Allocation, Battlefield, BattlefieldId, Round, RoundTerms, SealedRound};

pub use crate::rules::{
    Classic, DecreasingSoldiers,
    RoundGenerator, Ruleset, RulesetId, RulesetLibrary, ScoringMode,
};

pub use crate::scoring::{
    BattlefieldOutcome, FieldResult, RoundOutcome, Standing,
    ScoreLedger, ScoringEngine,
};

pub use crate::tournament::{
    Roster, StartOutcome, Tournament, TournamentSnapshot, TournamentStatus,
};
