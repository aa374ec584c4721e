use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_blotto::core::{PlayerMap, TiePolicy};
use rust_blotto::round::{Allocation, RoundTerms, SealedRound};
use rust_blotto::rules::{Classic, DecreasingSoldiers, RulesetId};
use rust_blotto::scoring::ScoringEngine;

/// Eight players, seven fields, budget 200, non-increasing spreads so the
/// same allocations are valid under both rulesets.
fn allocations() -> PlayerMap<Allocation> {
    PlayerMap::new(8, |player| {
        let lead = 20 + player.0 as u32;
        Allocation::new((0..7u32).map(|i| lead.saturating_sub(i * (player.0 as u32 % 3 + 1))))
    })
}

fn scoring_benchmark(c: &mut Criterion) {
    let engine = ScoringEngine::default().with_tie_policy(TiePolicy::Split);

    let classic = SealedRound::new(
        1,
        RoundTerms::uniform(RulesetId::CLASSIC, 7, 200),
        Arc::new(Classic),
        allocations(),
    )
    .unwrap();
    c.bench_function("score classic 8p", |b| {
        b.iter(|| engine.score(black_box(&classic)))
    });

    let margin = SealedRound::new(
        1,
        RoundTerms::uniform(RulesetId::DECREASING_SOLDIERS, 7, 200),
        Arc::new(DecreasingSoldiers),
        allocations(),
    )
    .unwrap();
    c.bench_function("score margin 8p", |b| {
        b.iter(|| engine.score(black_box(&margin)))
    });
}

criterion_group!(benches, scoring_benchmark);
criterion_main!(benches);
