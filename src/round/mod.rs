//! Rounds: battlefields, allocations, and the submit-then-seal lifecycle.
//!
//! A `Round` collects one allocation per player; sealing it yields an
//! immutable `SealedRound`, which is the only thing the scoring engine
//! accepts.

pub mod allocation;
pub mod battlefield;
pub mod open;
pub mod sealed;
pub mod terms;

pub use allocation::Allocation;
pub use battlefield::{Battlefield, BattlefieldId, MAX_FIELDS};
pub use open::{Round, MIN_PLAYERS};
pub use sealed::SealedRound;
pub use terms::RoundTerms;
