//! Deterministic random number generation for round generation.
//!
//! Tournaments draw their rulesets, battlefield counts and budgets from a
//! seeded [`GameRng`], so the same seed always produces the same schedule.
//! The generator state is tiny and serializable, which lets a tournament
//! snapshot resume exactly where it left off.
//!
//! ```
//! use rust_blotto::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.gen_range_inclusive(3, 7), b.gen_range_inclusive(3, 7));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Multiplier used to derive per-round seeds from the tournament seed.
const STREAM_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream for a single round.
    ///
    /// The stream depends only on the seed and the round number, not on how
    /// many values have been drawn from `self`.
    #[must_use]
    pub fn for_round(&self, round: u32) -> Self {
        Self::new(self.seed ^ u64::from(round).wrapping_add(1).wrapping_mul(STREAM_MIX))
    }

    /// Uniform integer in `low..=high`. Returns `low` when the range is empty.
    pub fn gen_range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for snapshots.
///
/// The ChaCha8 word position restores the stream in O(1) regardless of how
/// many values were drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
