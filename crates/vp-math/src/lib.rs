//! # vp-math
//!
//! Mathematical utilities for vanilla-pricer: the standard normal
//! distribution (delegating to `statrs` where it can), Gaussian random
//! number generators behind a swappable [`GaussianRng`] capability, a
//! streaming statistics accumulator, and tolerance comparisons.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparisons.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::{close, close_enough, relative_close};
pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use random_numbers::{
    stream_seed, GaussianRng, InverseCumulativeNormalRng, MersenneTwisterUniformRng,
    StandardNormalRng,
};
pub use statistics::IncrementalStatistics;
