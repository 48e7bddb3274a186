//! Random number generation for deck shuffling.
//!
//! The shuffle only ever needs one primitive: a uniform index in `[0, upper]`.
//! That primitive is the `RandomSource` trait, so tests can swap in a scripted
//! or order-preserving source.
//!
//! ```
//! use memory_pairs::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! // Same seed, same sequence
//! assert_eq!(a.index_inclusive(100), b.index_inclusive(100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random index provider.
pub trait RandomSource {
    /// Draw an index uniformly from `[0, upper]` (inclusive).
    fn index_inclusive(&mut self, upper: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn index_inclusive(&mut self, upper: usize) -> usize {
        (**self).index_inclusive(upper)
    }
}

/// Seedable RNG backed by ChaCha8.
///
/// The seed is kept so a surprising deal can be replayed.
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

    /// Create an RNG with a seed drawn from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn index_inclusive(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..=upper)
    }
}

/// Source that always draws `upper`.
///
/// Under Fisher-Yates every element swaps with itself, so the factory order
/// survives. Useful for fixtures that need a known layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShuffle;

impl RandomSource for NoShuffle {
    fn index_inclusive(&mut self, upper: usize) -> usize {
        upper
    }
}
