//! Error types for the Blotto engine.
//!
//! Every fallible operation returns [`Result<T>`], an alias over
//! [`BlottoError`]. Allocation problems carry an [`AllocationViolation`]
//! describing exactly which rule the submission broke, so callers can
//! report it back to the player and ask for a resubmission.

use thiserror::Error;

use super::player::PlayerId;
use crate::round::BattlefieldId;
use crate::rules::RulesetId;

/// Why an allocation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AllocationViolation {
    #[error("allocation commits {total} soldiers but the budget is {budget}")]
    OverBudget { total: u64, budget: u32 },

    #[error("{field}: commitments must not be negative (got {amount})")]
    NegativeCommitment { field: BattlefieldId, amount: i64 },

    #[error("{field}: commitment {amount} is out of range")]
    OutOfRange { field: BattlefieldId, amount: i64 },

    #[error("expected {expected} battlefields, got {actual}")]
    FieldCountMismatch { expected: usize, actual: usize },

    #[error("{field}: {amount} soldiers exceeds the {previous} committed to the previous field")]
    NotDecreasing {
        field: BattlefieldId,
        amount: u32,
        previous: u32,
    },

    #[error("could not read {token:?} as a soldier count")]
    Unparseable { token: String },
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum BlottoError {
    #[error("invalid allocation from {player}: {violation}")]
    InvalidAllocation {
        player: PlayerId,
        violation: AllocationViolation,
    },

    #[error("round {round} is incomplete: missing submissions from {missing:?}")]
    IncompleteRound { round: u32, missing: Vec<PlayerId> },

    #[error("round {round}, {battlefield}: {players:?} tied at {commitment} with no tie policy")]
    AmbiguousTie {
        round: u32,
        battlefield: BattlefieldId,
        commitment: u32,
        players: Vec<PlayerId>,
    },

    #[error("unknown ruleset {0}")]
    UnknownRuleset(RulesetId),

    #[error("round terms name ruleset {expected} but {actual} was supplied")]
    RulesetMismatch {
        expected: RulesetId,
        actual: RulesetId,
    },

    #[error("ruleset library is empty")]
    EmptyLibrary,

    #[error("{0} is not part of this round")]
    UnknownPlayer(PlayerId),

    #[error("{0:?} is not signed up")]
    UnknownParticipant(String),

    #[error("round {0} is already recorded in the ledger")]
    RoundAlreadyRecorded(u32),

    #[error("expected results for {expected} players, got {actual}")]
    PlayerCountMismatch { expected: usize, actual: usize },

    #[error("a round needs at least {required} players, got {actual}")]
    TooFewPlayers { required: usize, actual: usize },

    #[error("{0:?} is already signed up")]
    AlreadyJoined(String),

    #[error("{0:?} never signed up")]
    NotJoined(String),

    #[error("roster is full at {0} participants")]
    RosterFull(usize),

    #[error("signup is closed")]
    SignupClosed,

    #[error("tournament has already started")]
    AlreadyStarted,

    #[error("tournament is not in progress")]
    NotInProgress,

    #[error("tournament is over")]
    TournamentOver,

    #[error("tournament has not finished")]
    NotFinished,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl BlottoError {
    /// Wrap an allocation violation for a specific player.
    #[must_use]
    pub fn invalid_allocation(player: PlayerId, violation: AllocationViolation) -> Self {
        Self::InvalidAllocation { player, violation }
    }

    /// Whether the caller should ask the player to resubmit.
    #[must_use]
    pub fn is_resubmittable(&self) -> bool {
        matches!(self, Self::InvalidAllocation { .. })
    }
}

pub type Result<T> = std::result::Result<T, BlottoError>;
