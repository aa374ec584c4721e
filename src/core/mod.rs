//! Core engine types: players, RNG, configuration, errors.
//!
//! These are shared by every other module and carry no game rules of
//! their own.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{EngineConfig, GeneratorConfig, MissingSubmissionPolicy, TiePolicy, TournamentConfig};
pub use error::{AllocationViolation, BlottoError, Result};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
