use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform real generator shared by a galaxy and its stars.
/// Owned explicitly so a seed fully determines a run.
#[derive(Debug, Clone)]
pub struct RandomUtil {
    rng: ChaCha8Rng,
}

impl RandomUtil {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform in [min, max). A collapsed range (min >= max) yields min.
    pub fn random_real(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform in [0, 1)
    pub fn unit(&mut self) -> f32 {
        self.rng.gen_range(0.0..1.0f32)
    }
}
