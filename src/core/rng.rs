//! Deterministic random number generation.
//!
//! The engine draws randomness in exactly one place: the note mapping built
//! at match start. Keeping it behind a seeded ChaCha stream makes every match
//! replayable from `(config, commands)` alone.
//!
//! ```
//! use osero_duel::core::GameRng;
//!
//! let mut a = [0, 1, 2, 3, 4, 5, 6];
//! let mut b = a;
//! GameRng::new(42).shuffle(&mut a);
//! GameRng::new(42).shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded RNG. Same seed produces the identical sequence on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }
}

/// Serializable RNG state.
///
/// Uses ChaCha8 word position for O(1) capture regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
