//! Seeded randomness for search.
//!
//! The search draws tie-breaks and the child evaluated right after an
//! expansion from a single `GameRng`. Each batch of rollouts runs on a
//! forked stream, so the length of a playout never shifts the draws of the
//! tree walk.
//!
//! ```
//! use two_player_mcts::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut rollouts_a = a.fork();
//! let mut rollouts_b = b.fork();
//! assert_eq!(rollouts_a.pick_index(9), rollouts_b.pick_index(9));
//! assert_eq!(a.fork_count(), 1);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Increment used to spread fork seeds (fractional part of the golden ratio).
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream with deterministic forking.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of forks taken so far.
    #[must_use]
    pub fn fork_count(&self) -> u64 {
        self.forks
    }

    /// Derive a child stream.
    ///
    /// The child's seed depends only on this stream's seed and how many forks
    /// preceded it, not on how many values were drawn in between.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len == 0`.
    pub fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty range");
        self.inner.gen_range(0..len)
    }

    /// Uniformly chosen element, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
