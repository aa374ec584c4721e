//! Tournaments: signup, a fixed schedule of rounds, and cumulative scoring.
//!
//! A `Tournament` owns the roster, the generated round schedule, the open
//! `Round` and the `ScoreLedger`. It is a plain value mutated through
//! `&mut self`; callers that share it across threads wrap it themselves.

pub mod lifecycle;
pub mod roster;
pub mod snapshot;

pub use lifecycle::{StartOutcome, Tournament, TournamentStatus};
pub use roster::{Roster, MAX_PARTICIPANTS};
pub use snapshot::TournamentSnapshot;
