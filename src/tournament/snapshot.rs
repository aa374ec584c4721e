//! Tournament snapshots for persistence.
//!
//! Rulesets are trait objects and are not serialized; a snapshot stores only
//! ruleset ids, and `Tournament::restore` resolves them against a library.
//! Submissions are re-validated on restore.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lifecycle::{Tournament, TournamentStatus};
use super::roster::Roster;
use crate::core::{BlottoError, GameRng, GameRngState, PlayerMap, Result, TournamentConfig};
use crate::round::{Allocation, Round, RoundTerms};
use crate::rules::RulesetLibrary;
use crate::scoring::{ScoreLedger, ScoringEngine};

/// Everything needed to resume a tournament.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub config: TournamentConfig,
    pub roster: Roster,
    pub status: TournamentStatus,
    pub schedule: Vec<RoundTerms>,
    /// Submissions to the open round, if one is open.
    pub submissions: Option<PlayerMap<Option<Allocation>>>,
    pub ledger: Option<ScoreLedger>,
    pub rng: GameRngState,
}

impl TournamentSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Tournament {
    #[must_use]
    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            config: self.config.clone(),
            roster: self.roster.clone(),
            status: self.status,
            schedule: self.schedule.clone(),
            submissions: self.current.as_ref().map(|round| round.submissions().clone()),
            ledger: self.ledger.clone(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild a tournament from a snapshot.
    ///
    /// Fails if the config is invalid, the parts of the snapshot disagree
    /// with each other or with the status, a scheduled ruleset is missing
    /// from `library`, or a stored submission no longer passes validation.
    pub fn restore(snapshot: TournamentSnapshot, library: RulesetLibrary) -> Result<Self> {
        let TournamentSnapshot {
            config,
            roster,
            status,
            schedule,
            submissions,
            ledger,
            rng,
        } = snapshot;
        config.validate()?;
        check_consistency(&config, &roster, status, &schedule, submissions.as_ref(), ledger.as_ref())?;

        let current = match (status, submissions) {
            (TournamentStatus::InProgress { round }, Some(submissions)) => {
                let terms = schedule
                    .get((round as usize).wrapping_sub(1))
                    .cloned()
                    .ok_or_else(|| {
                        BlottoError::Config(format!("snapshot has no terms for round {round}"))
                    })?;
                let mut open = Round::open(round, terms, &library, roster.len())?;
                for (player, allocation) in submissions.iter() {
                    if let Some(allocation) = allocation {
                        open.submit(player, allocation.clone())?;
                    }
                }
                Some(open)
            }
            (TournamentStatus::InProgress { round }, None) => {
                return Err(BlottoError::Config(format!(
                    "snapshot is in round {round} but has no open round"
                )))
            }
            _ => None,
        };

        debug!(?status, players = roster.len(), "tournament restored");

        Ok(Self {
            engine: ScoringEngine::new(&config.engine),
            config,
            library,
            rng: GameRng::from_state(&rng),
            roster,
            status,
            schedule,
            current,
            ledger,
        })
    }
}

/// Structural checks on a snapshot before anything is rebuilt from it.
fn check_consistency(
    config: &TournamentConfig,
    roster: &Roster,
    status: TournamentStatus,
    schedule: &[RoundTerms],
    submissions: Option<&PlayerMap<Option<Allocation>>>,
    ledger: Option<&ScoreLedger>,
) -> Result<()> {
    let inconsistent = |what: String| Err(BlottoError::Config(format!("snapshot {what}")));

    roster
        .validate()
        .or_else(|err| inconsistent(format!("roster is invalid: {err}")))?;

    let recorded = match status {
        TournamentStatus::Signup | TournamentStatus::Canceled => {
            if !schedule.is_empty() || ledger.is_some() || submissions.is_some() {
                return inconsistent(format!("is {status:?} but already has rounds"));
            }
            return Ok(());
        }
        TournamentStatus::InProgress { round } => {
            if round == 0 || round > config.num_rounds {
                return inconsistent(format!("is in round {round} of {}", config.num_rounds));
            }
            round - 1
        }
        TournamentStatus::Finished => config.num_rounds,
    };

    if schedule.len() != config.num_rounds as usize {
        return inconsistent(format!(
            "schedules {} rounds but the config has {}",
            schedule.len(),
            config.num_rounds
        ));
    }
    if let Some(submissions) = submissions {
        if submissions.player_count() != roster.len() {
            return inconsistent(format!(
                "has submissions for {} players but {} on the roster",
                submissions.player_count(),
                roster.len()
            ));
        }
    }
    let Some(ledger) = ledger else {
        return inconsistent(format!("is {status:?} but has no ledger"));
    };
    if ledger.player_count() != roster.len() {
        return inconsistent(format!(
            "ledger tracks {} players but {} on the roster",
            ledger.player_count(),
            roster.len()
        ));
    }
    if ledger.round_count() != recorded as usize {
        return inconsistent(format!(
            "ledger has {} rounds, expected {recorded}",
            ledger.round_count()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GeneratorConfig, PlayerId};

    fn in_progress() -> Tournament {
        let config = TournamentConfig::default()
            .with_rounds(2)
            .with_generator(GeneratorConfig::default().with_fields(3, 3).with_budget(6, 6, 5));
        let mut tournament = Tournament::new(config, 9).unwrap();
        tournament.join("ada").unwrap();
        tournament.join("grace").unwrap();
        tournament.start().unwrap();
        tournament
    }

    #[test]
    fn test_restore_mid_round() {
        let mut tournament = in_progress();
        tournament.submit("ada", Allocation::new([20, 5, 5])).unwrap();

        let bytes = tournament.snapshot().to_bytes().unwrap();
        let snapshot = TournamentSnapshot::from_bytes(&bytes).unwrap();
        let restored = Tournament::restore(snapshot, RulesetLibrary::builtin()).unwrap();

        assert_eq!(restored.status(), tournament.status());
        assert_eq!(restored.schedule(), tournament.schedule());
        let round = restored.current_round().unwrap();
        assert_eq!(round.submission(PlayerId::new(0)), Some(&Allocation::new([20, 5, 5])));
        assert!(!round.has_submitted(PlayerId::new(1)));
    }

    #[test]
    fn test_restore_needs_rulesets() {
        let snapshot = in_progress().snapshot();
        let result = Tournament::restore(snapshot, RulesetLibrary::new());
        assert!(matches!(result, Err(BlottoError::UnknownRuleset(_))));
    }

    #[test]
    fn test_restore_signup() {
        let mut tournament = Tournament::new(TournamentConfig::default(), 3).unwrap();
        tournament.join("ada").unwrap();

        let restored = Tournament::restore(tournament.snapshot(), RulesetLibrary::builtin()).unwrap();
        assert_eq!(restored.status(), TournamentStatus::Signup);
        assert_eq!(restored.player_id("ada"), Some(PlayerId::new(0)));
        assert!(restored.current_round().is_none());
    }

    #[test]
    fn test_restore_truncated_schedule() {
        let mut snapshot = in_progress().snapshot();
        snapshot.schedule.truncate(1);

        let result = Tournament::restore(snapshot, RulesetLibrary::builtin());
        assert!(matches!(result, Err(BlottoError::Config(msg)) if msg.contains("schedules 1 rounds")));
    }

    #[test]
    fn test_restore_duplicate_roster() {
        let mut snapshot = in_progress().snapshot();
        snapshot.roster = Roster::from(vec!["ada".to_string(), "ada".to_string()]);

        let result = Tournament::restore(snapshot, RulesetLibrary::builtin());
        assert!(matches!(result, Err(BlottoError::Config(msg)) if msg.contains("roster")));
    }

    #[test]
    fn test_restore_ledger_player_mismatch() {
        let mut snapshot = in_progress().snapshot();
        snapshot.ledger = Some(ScoreLedger::new(3));

        let result = Tournament::restore(snapshot, RulesetLibrary::builtin());
        assert!(matches!(result, Err(BlottoError::Config(msg)) if msg.contains("ledger tracks 3")));

        let mut snapshot = in_progress().snapshot();
        snapshot.ledger = None;
        let result = Tournament::restore(snapshot, RulesetLibrary::builtin());
        assert!(matches!(result, Err(BlottoError::Config(_))));
    }

    #[test]
    fn test_restore_round_out_of_range() {
        let mut snapshot = in_progress().snapshot();
        snapshot.status = TournamentStatus::InProgress { round: 3 };

        let result = Tournament::restore(snapshot, RulesetLibrary::builtin());
        assert!(matches!(result, Err(BlottoError::Config(_))));
    }

    #[test]
    fn test_restore_finished() {
        let mut tournament = in_progress();
        for _ in 0..2 {
            tournament.submit("ada", Allocation::new([20, 5, 5])).unwrap();
            tournament.submit("grace", Allocation::new([10, 10, 10])).unwrap();
            tournament.close_round().unwrap();
        }
        assert_eq!(tournament.status(), TournamentStatus::Finished);

        let restored = Tournament::restore(tournament.snapshot(), RulesetLibrary::builtin()).unwrap();
        assert_eq!(restored.final_results().unwrap(), tournament.final_results().unwrap());
    }

    #[test]
    fn test_restore_inconsistent_snapshot() {
        let mut snapshot = in_progress().snapshot();
        snapshot.submissions = None;

        let result = Tournament::restore(snapshot, RulesetLibrary::builtin());
        assert!(matches!(result, Err(BlottoError::Config(_))));
    }
}
