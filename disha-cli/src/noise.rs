//! Seeded ranging noise for simulated walks.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};

/// Gaussian ranging error generator.
pub struct RangingNoise {
    rng: SmallRng,
    normal: Option<Normal<f32>>,
}

impl RangingNoise {
    /// A seed of 0 draws from entropy; any other seed is reproducible.
    ///
    /// `std_dev` is in meters; zero or a negative value disables noise.
    pub fn new(std_dev: f32, seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        let normal = (std_dev > 0.0).then(|| Normal::new(0.0, std_dev).ok()).flatten();
        Self { rng, normal }
    }

    /// Measured range for a true distance, never negative.
    pub fn range(&mut self, true_distance: f32) -> f32 {
        let error = match &self.normal {
            Some(normal) => normal.sample(&mut self.rng),
            None => 0.0,
        };
        (true_distance + error).max(0.0)
    }
}
