use super::GaussianRng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use vp_core::Real;

/// Standard normal deviates drawn from any `rand` generator.
///
/// ```
/// use vp_math::{GaussianRng, StandardNormalRng};
///
/// let mut rng = StandardNormalRng::seeded(11);
/// assert!(rng.next_gaussian().is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct StandardNormalRng<R = StdRng> {
    rng: R,
}

impl<R: Rng> StandardNormalRng<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl StandardNormalRng<StdRng> {
    /// A reproducible `StdRng`-backed generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GaussianRng for StandardNormalRng<R> {
    fn next_gaussian(&mut self) -> Real {
        StandardNormal.sample(&mut self.rng)
    }
}
