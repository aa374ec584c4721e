//! The tournament state machine.
//!
//! ```text
//! Signup ──start()──▶ InProgress { round: 1 } ──close_round()──▶ ... ──▶ Finished
//!    │
//!    └──cancel() / start() with too few signups──▶ Canceled
//! ```
//!
//! Every round's terms are drawn when the tournament starts, from the seeded
//! `GameRng`, so the same seed and config always produce the same schedule.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::roster::Roster;
use crate::core::{
    BlottoError, GameRng, MissingSubmissionPolicy, PlayerId, Result, TournamentConfig,
};
use crate::round::{Allocation, Round, RoundTerms};
use crate::rules::{RoundGenerator, RulesetLibrary};
use crate::scoring::{RoundOutcome, ScoreLedger, ScoringEngine, Standing};

/// Where a tournament is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentStatus {
    Signup,
    /// `round` is 1-based and currently accepting submissions.
    InProgress { round: u32 },
    Finished,
    Canceled,
}

impl TournamentStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, Self::Finished | Self::Canceled)
    }
}

/// What `Tournament::start` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started { players: usize, rounds: u32 },
    /// Too few signups; the tournament is now canceled.
    Canceled { signups: usize, required: usize },
}

/// A multi-round Blotto tournament.
///
/// ## Example
///
/// ```
/// use rust_blotto::core::TournamentConfig;
/// use rust_blotto::round::Allocation;
/// use rust_blotto::tournament::{StartOutcome, Tournament, TournamentStatus};
///
/// let mut tournament = Tournament::new(TournamentConfig::default().with_rounds(1), 7).unwrap();
/// tournament.join("ada").unwrap();
/// tournament.join("grace").unwrap();
///
/// assert!(matches!(tournament.start().unwrap(), StartOutcome::Started { players: 2, .. }));
///
/// let fields = tournament.current_round().unwrap().terms().field_count();
/// let mut lead = vec![0; fields];
/// lead[0] = 1;
/// tournament.submit("ada", Allocation::new(lead)).unwrap();
/// tournament.submit("grace", Allocation::zeroed(fields)).unwrap();
///
/// tournament.close_round().unwrap();
/// assert_eq!(tournament.status(), TournamentStatus::Finished);
/// assert_eq!(tournament.winners().unwrap(), vec!["ada"]);
/// ```
#[derive(Clone, Debug)]
pub struct Tournament {
    pub(super) config: TournamentConfig,
    pub(super) library: RulesetLibrary,
    pub(super) engine: ScoringEngine,
    pub(super) rng: GameRng,
    pub(super) roster: Roster,
    pub(super) status: TournamentStatus,
    pub(super) schedule: Vec<RoundTerms>,
    pub(super) current: Option<Round>,
    pub(super) ledger: Option<ScoreLedger>,
}

impl Tournament {
    /// Open signup for a tournament using the built-in rulesets.
    pub fn new(config: TournamentConfig, seed: u64) -> Result<Self> {
        Self::with_library(config, seed, RulesetLibrary::builtin())
    }

    /// Open signup for a tournament drawing rounds from `library`.
    pub fn with_library(config: TournamentConfig, seed: u64, library: RulesetLibrary) -> Result<Self> {
        config.validate()?;
        if library.is_empty() {
            return Err(BlottoError::EmptyLibrary);
        }

        Ok(Self {
            engine: ScoringEngine::new(&config.engine),
            config,
            library,
            rng: GameRng::new(seed),
            roster: Roster::new(),
            status: TournamentStatus::Signup,
            schedule: Vec::new(),
            current: None,
            ledger: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    #[must_use]
    pub fn library(&self) -> &RulesetLibrary {
        &self.library
    }

    #[must_use]
    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn player_id(&self, handle: &str) -> Option<PlayerId> {
        self.roster.player_id(handle)
    }

    #[must_use]
    pub fn handle(&self, player: PlayerId) -> Option<&str> {
        self.roster.handle(player)
    }

    /// Terms of every round; empty until the tournament starts.
    #[must_use]
    pub fn schedule(&self) -> &[RoundTerms] {
        &self.schedule
    }

    /// The round accepting submissions, if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    pub fn join(&mut self, handle: impl Into<String>) -> Result<PlayerId> {
        self.require_signup()?;
        let handle = handle.into();
        let player = self.roster.join(handle.clone())?;
        debug!(%handle, %player, "participant joined");
        Ok(player)
    }

    pub fn leave(&mut self, handle: &str) -> Result<()> {
        self.require_signup()?;
        self.roster.leave(handle)?;
        debug!(%handle, "participant left");
        Ok(())
    }

    /// Cancel during signup.
    pub fn cancel(&mut self) -> Result<()> {
        match self.status {
            TournamentStatus::Signup => {
                self.status = TournamentStatus::Canceled;
                info!(signups = self.roster.len(), "tournament canceled");
                Ok(())
            }
            TournamentStatus::InProgress { .. } => Err(BlottoError::AlreadyStarted),
            TournamentStatus::Finished | TournamentStatus::Canceled => {
                Err(BlottoError::TournamentOver)
            }
        }
    }

    /// Close signup and open round 1.
    ///
    /// With fewer than `min_participants` signups the tournament is canceled
    /// instead; that is reported through the returned `StartOutcome`, not as
    /// an error.
    pub fn start(&mut self) -> Result<StartOutcome> {
        match self.status {
            TournamentStatus::Signup => {}
            TournamentStatus::InProgress { .. } => return Err(BlottoError::AlreadyStarted),
            TournamentStatus::Finished | TournamentStatus::Canceled => {
                return Err(BlottoError::TournamentOver)
            }
        }

        let signups = self.roster.len();
        let required = self.config.min_participants;
        if signups < required {
            self.status = TournamentStatus::Canceled;
            info!(signups, required, "not enough participants, tournament canceled");
            return Ok(StartOutcome::Canceled { signups, required });
        }

        let generator = RoundGenerator::new(self.config.generator.clone());
        let rounds = self.config.num_rounds;
        let schedule = (1..=rounds)
            .map(|n| generator.generate(&self.library, &mut self.rng.for_round(n)))
            .collect::<Result<Vec<_>>>()?;
        let first = Round::open(1, schedule[0].clone(), &self.library, signups)?;

        self.schedule = schedule;
        self.current = Some(first);
        self.ledger = Some(ScoreLedger::new(signups));
        self.status = TournamentStatus::InProgress { round: 1 };

        info!(players = signups, rounds, "tournament started");
        Ok(StartOutcome::Started {
            players: signups,
            rounds,
        })
    }

    /// Submit an allocation for the current round.
    ///
    /// The allocation is checked immediately; on `InvalidAllocation` the
    /// participant may simply submit again. A valid submission replaces any
    /// earlier one and the replaced allocation is returned.
    pub fn submit(&mut self, handle: &str, allocation: Allocation) -> Result<Option<Allocation>> {
        let player = self
            .roster
            .player_id(handle)
            .ok_or_else(|| BlottoError::UnknownParticipant(handle.to_string()))?;
        let round = self.require_round_mut()?;
        let number = round.number();

        round.submit(player, allocation).map_err(|err| {
            debug!(%handle, round = number, error = %err, "submission rejected");
            err
        })
    }

    /// Seal, score and record the current round, then open the next one or
    /// finish.
    ///
    /// Missing submissions are handled by the configured
    /// `MissingSubmissionPolicy`. If sealing or scoring fails the round stays
    /// open, so participants can fix their submissions and the call can be
    /// retried.
    pub fn close_round(&mut self) -> Result<RoundOutcome> {
        let policy = self.config.engine.missing_submissions;
        let round = self.require_round_mut()?;
        let sealed = match policy {
            MissingSubmissionPolicy::Reject => round.seal()?,
            MissingSubmissionPolicy::Forfeit => round.seal_with_forfeits()?,
        };
        let number = sealed.number();

        let outcome = self.engine.score(&sealed)?;
        let ledger = match &self.ledger {
            Some(ledger) => ledger.record(&outcome)?,
            None => return Err(BlottoError::NotInProgress),
        };
        let next_round = if number < self.config.num_rounds {
            let next = number + 1;
            let terms = self
                .schedule
                .get(next as usize - 1)
                .cloned()
                .ok_or_else(|| BlottoError::Config(format!("no terms scheduled for round {next}")))?;
            Some(Round::open(next, terms, &self.library, self.roster.len())?)
        } else {
            None
        };
        self.ledger = Some(ledger);

        info!(round = number, leaders = ?outcome.leaders(), "round closed");

        match next_round {
            Some(round) => {
                self.status = TournamentStatus::InProgress { round: round.number() };
                self.current = Some(round);
            }
            None => {
                self.current = None;
                self.status = TournamentStatus::Finished;
                info!(winners = ?self.winners()?, "tournament finished");
            }
        }

        Ok(outcome)
    }

    /// Cumulative standings so far; empty before the tournament starts.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.ledger
            .as_ref()
            .map(ScoreLedger::standings)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn ledger(&self) -> Option<&ScoreLedger> {
        self.ledger.as_ref()
    }

    /// Outcome of a closed round.
    #[must_use]
    pub fn round_outcome(&self, round: u32) -> Option<&RoundOutcome> {
        self.ledger.as_ref().and_then(|ledger| ledger.outcome(round))
    }

    /// Final standings. Fails with `NotFinished` until the last round closes.
    pub fn final_results(&self) -> Result<Vec<Standing>> {
        match self.status {
            TournamentStatus::Finished => Ok(self.standings()),
            _ => Err(BlottoError::NotFinished),
        }
    }

    /// Handles of everyone ranked first once the tournament is finished.
    pub fn winners(&self) -> Result<Vec<&str>> {
        Ok(self
            .final_results()?
            .iter()
            .filter(|s| s.rank == 1)
            .filter_map(|s| self.roster.handle(s.player))
            .collect())
    }

    fn require_signup(&self) -> Result<()> {
        match self.status {
            TournamentStatus::Signup => Ok(()),
            _ => Err(BlottoError::SignupClosed),
        }
    }

    fn require_round_mut(&mut self) -> Result<&mut Round> {
        match self.status {
            TournamentStatus::Signup => return Err(BlottoError::NotInProgress),
            TournamentStatus::Finished | TournamentStatus::Canceled => {
                return Err(BlottoError::TournamentOver)
            }
            TournamentStatus::InProgress { .. } => {}
        }
        self.current.as_mut().ok_or(BlottoError::NotInProgress)
    }
}
