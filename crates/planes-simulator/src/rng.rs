//! Bounded integer randomness behind every autopilot decision.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of inclusive bounded integers.
pub trait Dice {
    /// Uniform integer in `[min, max]`. Swapped bounds are accepted and
    /// treated as `[max, min]`.
    fn random_int(&mut self, min: i32, max: i32) -> i32;
}

/// Process RNG, seeded once and never reseeded.
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: StdRng,
}

impl SimRng {
    /// Seed from the wall clock.
    pub fn from_clock() -> Self {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();
        Self::seeded(nanos as u64)
    }

    /// Seed explicitly.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for SimRng {
    fn random_int(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }
}
