//! Tournament lifecycle tests.
//!
//! These tests run whole tournaments: signup, start, every round, and the
//! final standings, plus configuration loading and snapshot recovery.

use rust_blotto::core::{
    BlottoError, EngineConfig, GeneratorConfig, MissingSubmissionPolicy, PlayerId, TiePolicy,
    TournamentConfig,
};
use rust_blotto::round::Allocation;
use rust_blotto::rules::{Classic, RulesetId, RulesetLibrary};
use rust_blotto::tournament::{StartOutcome, Tournament, TournamentSnapshot, TournamentStatus};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Three rounds of four fields with a budget of 40.
fn fixed_config() -> TournamentConfig {
    TournamentConfig::default()
        .with_rounds(3)
        .with_generator(GeneratorConfig::default().with_fields(4, 4).with_budget(8, 8, 5))
}

/// Non-increasing spread of `budget` over `fields`, front-loaded by `tilt`.
/// Valid under every built-in ruleset.
fn spread(fields: usize, budget: u32, tilt: u32) -> Allocation {
    let base = budget / fields as u32;
    let mut amounts = vec![base; fields];
    let moved = tilt.min(base);
    amounts[0] += moved;
    amounts[fields - 1] -= moved;
    Allocation::new(amounts)
}

fn submit_all(tournament: &mut Tournament, tilts: &[(&str, u32)]) {
    let round = tournament.current_round().unwrap();
    let fields = round.terms().field_count();
    let budget = round.terms().budget;
    for &(handle, tilt) in tilts {
        tournament.submit(handle, spread(fields, budget, tilt)).unwrap();
    }
}

/// Test a four-player tournament from signup to final results.
#[test]
fn test_full_tournament() {
    init_tracing();
    let config = fixed_config().with_engine(EngineConfig::default().with_tie_policy(TiePolicy::Split));
    let mut tournament = Tournament::new(config, 2024).unwrap();

    for handle in ["ada", "grace", "linus", "barbara"] {
        tournament.join(handle).unwrap();
    }
    assert_eq!(
        tournament.start().unwrap(),
        StartOutcome::Started { players: 4, rounds: 3 }
    );

    for round in 1..=3 {
        assert_eq!(tournament.status(), TournamentStatus::InProgress { round });
        submit_all(
            &mut tournament,
            &[("ada", 0), ("grace", 2), ("linus", 4), ("barbara", 6)],
        );
        let outcome = tournament.close_round().unwrap();
        assert_eq!(outcome.round, round);
        assert_eq!(outcome.player_count(), 4);
    }

    assert_eq!(tournament.status(), TournamentStatus::Finished);
    let results = tournament.final_results().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].rank, 1);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));

    let ledger = tournament.ledger().unwrap();
    assert_eq!(ledger.round_count(), 3);
    for standing in &results {
        let per_round: u64 = (1..=3)
            .filter_map(|n| ledger.round_result(n, standing.player))
            .sum();
        assert_eq!(per_round, standing.score);
    }
}

/// Test that a tournament with one signup is canceled at start.
#[test]
fn test_cancel_for_lack_of_participants() {
    let mut tournament = Tournament::new(fixed_config(), 1).unwrap();
    tournament.join("ada").unwrap();

    assert_eq!(
        tournament.start().unwrap(),
        StartOutcome::Canceled { signups: 1, required: 2 }
    );
    assert!(tournament.status().is_over());
    assert!(matches!(
        tournament.submit("ada", Allocation::zeroed(4)),
        Err(BlottoError::TournamentOver)
    ));
}

/// Test the configured minimum participant count.
#[test]
fn test_custom_min_participants() {
    let mut tournament = Tournament::new(fixed_config().with_min_participants(3), 1).unwrap();
    tournament.join("ada").unwrap();
    tournament.join("grace").unwrap();

    assert!(matches!(tournament.start().unwrap(), StartOutcome::Canceled { required: 3, .. }));
}

/// Test leaving during signup and joining after signup closes.
#[test]
fn test_signup_window() {
    let mut tournament = Tournament::new(fixed_config(), 1).unwrap();
    tournament.join("ada").unwrap();
    tournament.join("grace").unwrap();
    tournament.join("linus").unwrap();
    tournament.leave("grace").unwrap();
    tournament.start().unwrap();

    assert_eq!(tournament.roster().len(), 2);
    assert_eq!(tournament.handle(PlayerId::new(1)), Some("linus"));
    assert!(matches!(tournament.join("late"), Err(BlottoError::SignupClosed)));
    assert!(matches!(tournament.leave("ada"), Err(BlottoError::SignupClosed)));
}

/// Test an invalid submission can be fixed by resubmitting.
#[test]
fn test_resubmit_after_rejection() {
    let mut tournament = Tournament::new(fixed_config(), 5).unwrap();
    tournament.join("ada").unwrap();
    tournament.join("grace").unwrap();
    tournament.start().unwrap();

    let err = tournament.submit("ada", Allocation::new([41, 0, 0, 0])).unwrap_err();
    assert!(err.is_resubmittable());

    assert_eq!(tournament.submit("ada", spread(4, 40, 0)).unwrap(), None);
    assert_eq!(
        tournament.submit("ada", spread(4, 40, 3)).unwrap(),
        Some(spread(4, 40, 0))
    );
}

/// Test the forfeit policy lets a round close without everyone.
#[test]
fn test_forfeit_policy() {
    let config = fixed_config().with_engine(
        EngineConfig::default().with_missing_submissions(MissingSubmissionPolicy::Forfeit),
    );
    let mut tournament = Tournament::new(config, 3).unwrap();
    tournament.join("ada").unwrap();
    tournament.join("grace").unwrap();
    tournament.start().unwrap();

    tournament.submit("ada", spread(4, 40, 0)).unwrap();
    let outcome = tournament.close_round().unwrap();

    let ada = tournament.player_id("ada").unwrap();
    let grace = tournament.player_id("grace").unwrap();
    assert!(outcome.score(ada) > 0);
    assert_eq!(outcome.score(grace), 0);
    assert_eq!(tournament.status(), TournamentStatus::InProgress { round: 2 });
}

/// Test the reject policy reports who is missing.
#[test]
fn test_reject_policy_reports_missing() {
    let mut tournament = Tournament::new(fixed_config(), 3).unwrap();
    tournament.join("ada").unwrap();
    tournament.join("grace").unwrap();
    tournament.start().unwrap();
    tournament.submit("grace", spread(4, 40, 0)).unwrap();

    match tournament.close_round().unwrap_err() {
        BlottoError::IncompleteRound { round, missing } => {
            assert_eq!(round, 1);
            assert_eq!(missing, vec![tournament.player_id("ada").unwrap()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Test a tie under the default policy keeps the round open until resubmitted.
#[test]
fn test_rejected_tie_keeps_round_open() {
    init_tracing();
    let mut library = RulesetLibrary::new();
    library.register(Classic);
    let mut tournament = Tournament::with_library(fixed_config(), 11, library).unwrap();
    tournament.join("ada").unwrap();
    tournament.join("grace").unwrap();
    tournament.start().unwrap();
    assert!(tournament.schedule().iter().all(|terms| terms.ruleset == RulesetId::CLASSIC));

    tournament.submit("ada", Allocation::new([10, 10, 10, 10])).unwrap();
    tournament.submit("grace", Allocation::new([10, 10, 10, 10])).unwrap();

    assert!(matches!(
        tournament.close_round(),
        Err(BlottoError::AmbiguousTie { commitment: 10, .. })
    ));
    assert_eq!(tournament.status(), TournamentStatus::InProgress { round: 1 });
    assert!(tournament.ledger().unwrap().is_empty());
    assert!(tournament.current_round().unwrap().has_submitted(PlayerId::new(0)));

    tournament.submit("grace", Allocation::new([11, 11, 11, 7])).unwrap();
    let outcome = tournament.close_round().unwrap();

    assert_eq!(outcome.round, 1);
    let ada = tournament.player_id("ada").unwrap();
    let grace = tournament.player_id("grace").unwrap();
    assert!(outcome.score(grace) > outcome.score(ada));
    assert_eq!(tournament.status(), TournamentStatus::InProgress { round: 2 });
    assert_eq!(tournament.ledger().unwrap().round_count(), 1);
}

/// Test a tournament restored from a snapshot finishes the same way.
#[test]
fn test_snapshot_resume() {
    let config = fixed_config().with_engine(EngineConfig::default().with_tie_policy(TiePolicy::Split));
    let mut original = Tournament::new(config, 77).unwrap();
    original.join("ada").unwrap();
    original.join("grace").unwrap();
    original.start().unwrap();
    submit_all(&mut original, &[("ada", 0), ("grace", 5)]);
    original.close_round().unwrap();
    original.submit("ada", spread(4, 40, 2)).unwrap();

    let bytes = original.snapshot().to_bytes().unwrap();
    let mut restored =
        Tournament::restore(TournamentSnapshot::from_bytes(&bytes).unwrap(), RulesetLibrary::builtin())
            .unwrap();

    for tournament in [&mut original, &mut restored] {
        tournament.submit("grace", spread(4, 40, 1)).unwrap();
        tournament.close_round().unwrap();
        submit_all(tournament, &[("ada", 4), ("grace", 4)]);
        tournament.close_round().unwrap();
    }

    assert_eq!(original.final_results().unwrap(), restored.final_results().unwrap());
    assert_eq!(original.snapshot(), restored.snapshot());
}

/// Test loading a tournament config from TOML.
#[test]
fn test_config_from_toml() {
    let config = TournamentConfig::from_toml_str(
        r#"
        num_rounds = 5

        [engine]
        tie_policy = "split"
        missing_submissions = "forfeit"

        [generator]
        min_fields = 4
        max_fields = 6
        "#,
    )
    .unwrap();

    assert_eq!(config.num_rounds, 5);
    assert_eq!(config.min_participants, 2);
    assert_eq!(config.engine.tie_policy, TiePolicy::Split);
    assert_eq!(config.generator.min_fields, 4);
    assert_eq!(config.generator.budget_step, 5);

    let mut tournament = Tournament::new(config, 1).unwrap();
    tournament.join("ada").unwrap();
    tournament.join("grace").unwrap();
    tournament.start().unwrap();
    assert!(tournament
        .schedule()
        .iter()
        .all(|terms| (4..=6).contains(&terms.field_count())));
}

/// Test invalid configs are rejected before a tournament exists.
#[test]
fn test_invalid_config() {
    assert!(matches!(
        Tournament::new(TournamentConfig::default().with_rounds(0), 1),
        Err(BlottoError::Config(_))
    ));
    assert!(matches!(
        TournamentConfig::from_toml_str("num_rounds = \"many\""),
        Err(BlottoError::Toml(_))
    ));
}
