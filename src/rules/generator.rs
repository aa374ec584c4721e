//! Random round generation for tournaments.

use tracing::debug;

use super::library::RulesetLibrary;
use super::ruleset::RulesetId;
use crate::core::{GameRng, GeneratorConfig, Result};
use crate::round::RoundTerms;

/// Draws round terms from a `GeneratorConfig`.
///
/// Every generated battlefield is worth 1 point; the ruleset, field count and
/// budget are random.
///
/// ```
/// use rust_blotto::core::{GameRng, GeneratorConfig};
/// use rust_blotto::rules::{RoundGenerator, RulesetLibrary};
///
/// let generator = RoundGenerator::new(GeneratorConfig::default());
/// let terms = generator
///     .generate(&RulesetLibrary::builtin(), &mut GameRng::new(1))
///     .unwrap();
///
/// assert!((3..=7).contains(&terms.field_count()));
/// assert_eq!(terms.budget % 5, 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RoundGenerator {
    config: GeneratorConfig,
}

impl RoundGenerator {
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, library: &RulesetLibrary, rng: &mut GameRng) -> Result<RoundTerms> {
        self.config.validate()?;

        let ruleset = library.choose(rng)?;
        let fields = rng.gen_range_inclusive(self.config.min_fields, self.config.max_fields);
        let steps = rng.gen_range_inclusive(
            self.config.min_budget_steps,
            self.config.max_budget_steps,
        );
        let budget = steps * self.config.budget_step;

        debug!(ruleset = %ruleset.id(), fields, budget, "generated round terms");

        Ok(RoundTerms::uniform(ruleset.id(), clamp_fields(fields), budget))
    }

    /// Rebuild terms from stored values, checking the ruleset exists.
    pub fn load(
        library: &RulesetLibrary,
        ruleset: RulesetId,
        fields: u16,
        budget: u32,
    ) -> Result<RoundTerms> {
        library.get(ruleset)?;
        Ok(RoundTerms::uniform(ruleset, fields, budget))
    }
}

fn clamp_fields(fields: u32) -> u16 {
    u16::try_from(fields).unwrap_or(u16::MAX)
}
