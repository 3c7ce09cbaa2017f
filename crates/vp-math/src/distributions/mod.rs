//! Probability distributions.
//!
//! Only the standard normal is needed: its CDF prices the closed-form
//! benchmark and its inverse turns uniform deviates into Gaussian ones.

pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};
