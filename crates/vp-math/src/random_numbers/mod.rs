//! Random number generators.
//!
//! Simulation code never reaches for ambient randomness: it is handed a
//! [`GaussianRng`], so tests can pin the stream with a seed and callers can
//! swap generators freely.
//!
//! * [`InverseCumulativeNormalRng`]: Mersenne Twister MT19937-64 (via
//!   `rand_mt`) pushed through the inverse normal CDF; the default.
//! * [`StandardNormalRng`]: adapts any `rand::Rng` using
//!   `rand_distr::StandardNormal`.
//! * [`stream_seed`]: derives independent per-worker seeds from one master
//!   seed for partitioned parallel simulation.

mod standard_normal;

pub use standard_normal::StandardNormalRng;

use rand_mt::Mt19937GenRand64;
use vp_core::Real;

/// A source of independent standard normal deviates.
pub trait GaussianRng {
    /// Draw the next `N(0, 1)` deviate.
    fn next_gaussian(&mut self) -> Real;
}

impl<G: GaussianRng + ?Sized> GaussianRng for &mut G {
    fn next_gaussian(&mut self) -> Real {
        (**self).next_gaussian()
    }
}

impl<G: GaussianRng + ?Sized> GaussianRng for Box<G> {
    fn next_gaussian(&mut self) -> Real {
        (**self).next_gaussian()
    }
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // Top 53 bits, so every value is exactly representable.
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }
}

/// Standard normal deviates by inversion of Mersenne Twister uniforms.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }
}

impl GaussianRng for InverseCumulativeNormalRng {
    fn next_gaussian(&mut self) -> Real {
        // Exact 0 would map to −∞.
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        crate::distributions::normal_cdf_inverse(u)
    }
}

/// Derive the seed of stream `index` from a master `seed`.
///
/// SplitMix64 finaliser over `seed ⊕ golden·(index + 1)`: neighbouring
/// indices land on unrelated Mersenne Twister states.
pub fn stream_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
