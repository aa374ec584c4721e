//! Engine and tournament configuration.
//!
//! - `EngineConfig`: how rounds are scored (tie policy, missing submissions)
//! - `GeneratorConfig`: the ranges random rounds are drawn from
//! - `TournamentConfig`: round count, signup minimum, and the two above
//!
//! All three use builder-style `with_*` methods and can be loaded from TOML:
//!
//! ```
//! use rust_blotto::core::{TiePolicy, TournamentConfig};
//!
//! let config = TournamentConfig::from_toml_str(r#"
//!     num_rounds = 3
//!
//!     [engine]
//!     tie_policy = "split"
//! "#).unwrap();
//!
//! assert_eq!(config.num_rounds, 3);
//! assert_eq!(config.engine.tie_policy, TiePolicy::Split);
//! assert_eq!(config.min_participants, 2);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{BlottoError, Result};

/// What happens when several players share the top commitment on a
/// battlefield under winner-takes-value scoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Fail scoring with `AmbiguousTie`.
    #[default]
    Reject,
    /// Each tied player receives `value / tied`; the remainder is not awarded.
    Split,
    /// Nobody receives the battlefield's value.
    Void,
}

/// What closing a round does about participants who never submitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSubmissionPolicy {
    /// Fail with `IncompleteRound` and keep the round open.
    #[default]
    Reject,
    /// Enter the missing player with an all-zero allocation.
    Forfeit,
}

/// Scoring configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tie_policy: TiePolicy,
    pub missing_submissions: MissingSubmissionPolicy,
}

impl EngineConfig {
    #[must_use]
    pub fn with_tie_policy(mut self, policy: TiePolicy) -> Self {
        self.tie_policy = policy;
        self
    }

    #[must_use]
    pub fn with_missing_submissions(mut self, policy: MissingSubmissionPolicy) -> Self {
        self.missing_submissions = policy;
        self
    }
}

/// Ranges for randomly generated rounds.
///
/// Budgets are drawn as `k * budget_step` with `k` in
/// `min_budget_steps..=max_budget_steps`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub min_fields: u32,
    pub max_fields: u32,
    pub min_budget_steps: u32,
    pub max_budget_steps: u32,
    pub budget_step: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_fields: 3,
            max_fields: 7,
            min_budget_steps: 6,
            max_budget_steps: 20,
            budget_step: 5,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_fields(mut self, min: u32, max: u32) -> Self {
        self.min_fields = min;
        self.max_fields = max;
        self
    }

    /// Set the budget range as `min_steps..=max_steps` multiples of `step`.
    #[must_use]
    pub fn with_budget(mut self, min_steps: u32, max_steps: u32, step: u32) -> Self {
        self.min_budget_steps = min_steps;
        self.max_budget_steps = max_steps;
        self.budget_step = step;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_fields == 0 {
            return Err(BlottoError::Config("min_fields must be at least 1".into()));
        }
        if self.min_fields > self.max_fields {
            return Err(BlottoError::Config(format!(
                "field range {}..={} is empty",
                self.min_fields, self.max_fields
            )));
        }
        if self.budget_step == 0 {
            return Err(BlottoError::Config("budget_step must be at least 1".into()));
        }
        if self.min_budget_steps > self.max_budget_steps {
            return Err(BlottoError::Config(format!(
                "budget step range {}..={} is empty",
                self.min_budget_steps, self.max_budget_steps
            )));
        }
        if self.max_budget_steps.checked_mul(self.budget_step).is_none() {
            return Err(BlottoError::Config("maximum budget overflows u32".into()));
        }
        Ok(())
    }
}

/// Complete tournament configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub num_rounds: u32,
    /// Fewer signups than this cancels the tournament at start.
    pub min_participants: usize,
    pub engine: EngineConfig,
    pub generator: GeneratorConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            num_rounds: 3,
            min_participants: 2,
            engine: EngineConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl TournamentConfig {
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.num_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_min_participants(mut self, min: usize) -> Self {
        self.min_participants = min;
        self
    }

    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    #[must_use]
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_rounds == 0 {
            return Err(BlottoError::Config("num_rounds must be at least 1".into()));
        }
        if !(2..=255).contains(&self.min_participants) {
            return Err(BlottoError::Config(format!(
                "min_participants must be between 2 and 255, got {}",
                self.min_participants
            )));
        }
        self.generator.validate()
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
