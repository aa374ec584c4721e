//! Ruleset library for lookup by id and random selection.
//!
//! Rounds store only a `RulesetId`; the library turns it back into the
//! ruleset when a round is opened or a snapshot is restored.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::ruleset::{Classic, DecreasingSoldiers, Ruleset, RulesetId};
use crate::core::{BlottoError, GameRng, Result};

/// Registry of rulesets.
///
/// ## Example
///
/// ```
/// use rust_blotto::rules::{RulesetId, RulesetLibrary};
///
/// let library = RulesetLibrary::builtin();
/// let rules = library.get(RulesetId::DECREASING_SOLDIERS).unwrap();
/// assert_eq!(rules.name(), "Decreasing Soldiers");
/// assert!(library.get(RulesetId::new(99)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RulesetLibrary {
    rulesets: FxHashMap<RulesetId, Arc<dyn Ruleset>>,
}

impl RulesetLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding `Classic` and `DecreasingSoldiers`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.register(Classic);
        library.register(DecreasingSoldiers);
        library
    }

    /// Register a ruleset.
    ///
    /// Panics if a ruleset with the same ID already exists.
    pub fn register(&mut self, ruleset: impl Ruleset + 'static) {
        let id = ruleset.id();
        if self.rulesets.contains_key(&id) {
            panic!("Ruleset with ID {:?} already registered", id);
        }
        self.rulesets.insert(id, Arc::new(ruleset));
    }

    pub fn get(&self, id: RulesetId) -> Result<Arc<dyn Ruleset>> {
        self.rulesets
            .get(&id)
            .cloned()
            .ok_or(BlottoError::UnknownRuleset(id))
    }

    #[must_use]
    pub fn contains(&self, id: RulesetId) -> bool {
        self.rulesets.contains_key(&id)
    }

    /// Registered ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<RulesetId> {
        let mut ids: Vec<_> = self.rulesets.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rulesets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }

    /// Pick a ruleset uniformly at random.
    ///
    /// Ids are sorted first so the pick depends only on the RNG state.
    pub fn choose(&self, rng: &mut GameRng) -> Result<Arc<dyn Ruleset>> {
        let ids = self.ids();
        let id = rng.choose(&ids).copied().ok_or(BlottoError::EmptyLibrary)?;
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ScoringMode;

    #[derive(Debug)]
    struct Sudden;

    impl Ruleset for Sudden {
        fn id(&self) -> RulesetId {
            RulesetId::new(7)
        }
        fn name(&self) -> &str {
            "Sudden"
        }
        fn rules_text(&self) -> &str {
            ""
        }
        fn scoring_mode(&self) -> ScoringMode {
            ScoringMode::WinnerTakesValue
        }
    }

    #[test]
    fn test_builtin_library() {
        let library = RulesetLibrary::builtin();

        assert_eq!(library.len(), 2);
        assert_eq!(
            library.ids(),
            vec![RulesetId::CLASSIC, RulesetId::DECREASING_SOLDIERS]
        );
        assert_eq!(library.get(RulesetId::CLASSIC).unwrap().name(), "Classic");
    }

    #[test]
    fn test_unknown_ruleset() {
        let library = RulesetLibrary::builtin();
        assert!(matches!(
            library.get(RulesetId::new(42)),
            Err(BlottoError::UnknownRuleset(RulesetId(42)))
        ));
    }

    #[test]
    fn test_register_custom() {
        let mut library = RulesetLibrary::builtin();
        library.register(Sudden);

        assert!(library.contains(RulesetId::new(7)));
        assert_eq!(library.ids().last(), Some(&RulesetId::new(7)));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_register_duplicate() {
        let mut library = RulesetLibrary::builtin();
        library.register(Classic);
    }

    #[test]
    fn test_choose_is_deterministic() {
        let library = RulesetLibrary::builtin();
        let mut rng1 = GameRng::new(3);
        let mut rng2 = GameRng::new(3);

        for _ in 0..20 {
            let a = library.choose(&mut rng1).unwrap().id();
            let b = library.choose(&mut rng2).unwrap().id();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_choose_from_empty() {
        let library = RulesetLibrary::new();
        let mut rng = GameRng::new(1);

        assert!(library.is_empty());
        assert!(matches!(
            library.choose(&mut rng),
            Err(BlottoError::EmptyLibrary)
        ));
    }
}
