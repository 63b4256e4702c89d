//! Random number generation for dungeon layouts
//!
//! Uses a seeded ChaCha RNG so a seed and configuration always reproduce
//! the same layout.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generation random number generator
///
/// Wraps ChaCha8Rng and remembers the seed it was created from so the seed
/// can be reported alongside the output.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DungeonRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a fresh, non-zero random seed
    pub fn from_entropy() -> Self {
        let mut seed: u64 = rand::random();
        while seed == 0 {
            seed = rand::random();
        }
        Self::new(seed)
    }

    /// Create an RNG for a configured seed, where 0 means "pick one"
    pub fn for_config_seed(seed: u64) -> Self {
        if seed == 0 {
            Self::from_entropy()
        } else {
            Self::new(seed)
        }
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `low..high`
    ///
    /// Returns `low` if the range is empty.
    pub fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// Uniform float in `0.0..1.0`
    pub fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Returns true with the given probability
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        let mut rng = DungeonRng::new(42);
        for _ in 0..1000 {
            let n = rng.range(-3, 10);
            assert!((-3..10).contains(&n));
        }
    }

    #[test]
    fn test_empty_range() {
        let mut rng = DungeonRng::new(42);
        assert_eq!(rng.range(5, 5), 5);
        assert_eq!(rng.range(5, 2), 5);
    }

    #[test]
    fn test_unit_bounds() {
        let mut rng = DungeonRng::new(7);
        for _ in 0..1000 {
            let f = rng.unit();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = DungeonRng::new(7);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = DungeonRng::new(42);
        let mut rng2 = DungeonRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.range(0, 100), rng2.range(0, 100));
        }
        assert_eq!(rng1.seed(), 42);
    }

    #[test]
    fn test_config_seed_zero_picks_fresh_seed() {
        let rng = DungeonRng::for_config_seed(0);
        assert_ne!(rng.seed(), 0);
        assert_eq!(DungeonRng::for_config_seed(99).seed(), 99);
    }
}
