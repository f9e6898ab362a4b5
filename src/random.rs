use rand::{Rng, SeedableRng, rngs::StdRng};

/// Uniform sampling over a half-open range, the only randomness the
/// simulation consumes.
pub trait UniformSource {
    fn uniform_f32(&mut self, min: f32, max: f32) -> f32;
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn uniform_f32(&mut self, min: f32, max: f32) -> f32 {
        self.gen_range(min..max)
    }
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
