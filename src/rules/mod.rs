//! Rulesets: what a legal allocation is and how it scores.
//!
//! - `Ruleset`: trait implemented by each round variant
//! - `RulesetLibrary`: lookup by id and random selection
//! - `RoundGenerator`: random round terms for tournaments

pub mod generator;
pub mod library;
pub mod ruleset;

pub use generator::RoundGenerator;
pub use library::RulesetLibrary;
pub use ruleset::{Classic, DecreasingSoldiers, Ruleset, RulesetId, ScoringMode};
