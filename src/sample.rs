//! Random source for word sampling and highlight colors
//!
//! Everything random in a query goes through [`Sampler`], so a seeded
//! sampler reproduces the same words and colors.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::highlight::Color;

/// Seedable random source
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
    seed: Option<u64>,
}

impl Sampler {
    /// Sampler seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Deterministic sampler
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draw `min(count, items.len())` distinct items uniformly at random,
    /// in draw order.
    pub fn sample<'a, T>(&mut self, items: &'a [T], count: usize) -> Vec<&'a T> {
        let amount = count.min(items.len());
        if amount == 0 {
            return Vec::new();
        }

        index::sample(&mut self.rng, items.len(), amount)
            .into_iter()
            .map(|i| &items[i])
            .collect()
    }

    /// Uniform 24-bit RGB color
    pub fn color(&mut self) -> Color {
        Color::from_rgb(self.rng.gen_range(0..=Color::MAX))
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_bounds_and_uniqueness() {
        let items: Vec<u32> = (0..50).collect();
        let mut sampler = Sampler::from_seed(7);

        for count in [0, 1, 5, 10, 50, 80] {
            let picked = sampler.sample(&items, count);
            assert_eq!(picked.len(), count.min(items.len()));

            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
        }
    }

    #[test]
    fn test_sample_empty() {
        let items: Vec<String> = Vec::new();
        let mut sampler = Sampler::from_entropy();
        assert!(sampler.sample(&items, 10).is_empty());
    }

    #[test]
    fn test_seed_is_reproducible() {
        let items: Vec<u32> = (0..1000).collect();

        let mut a = Sampler::from_seed(42);
        let mut b = Sampler::from_seed(42);
        assert_eq!(a.sample(&items, 10), b.sample(&items, 10));
        assert_eq!(a.color(), b.color());
        assert_eq!(a.seed(), Some(42));
    }

    #[test]
    fn test_color_range() {
        let mut sampler = Sampler::from_seed(1);
        for _ in 0..100 {
            assert!(sampler.color().rgb() <= Color::MAX);
        }
    }
}
