use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Session random number generator with a recorded seed.
///
/// The seed stays fixed for the whole session so that a saved game cannot be
/// re-rolled by reloading, and so a crash can be reproduced from the logged
/// seed alone.
#[derive(Debug)]
pub struct SessionRandom {
    seed: u64,
    rng: StdRng,
}

impl SessionRandom {
    /// Creates a generator with a fresh OS-entropy seed.
    pub fn new() -> Self {
        Self::from_seed(rand::random())
    }

    /// Creates a generator from a known seed, reproducing the exact sequence
    /// of an earlier session.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `low..=high`.
    pub fn range_i16(&mut self, low: i16, high: i16) -> i16 {
        self.rng.gen_range(low..=high)
    }

    /// Uniform value in `low..high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low..high)
    }

    /// True with probability `probability` (clamped to 0..=1).
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }
}

impl Default for SessionRandom {
    fn default() -> Self {
        Self::new()
    }
}
