//! Error types for vanilla-pricer.
//!
//! A single `thiserror`-derived enum covers the three ways a pricing call can
//! fail: bad inputs, a failing payoff, and a model whose risk-neutral
//! probability is ill-defined. The [`ensure!`](crate::ensure) and
//! [`ensure_model!`](crate::ensure_model) macros are the usual way to raise
//! the first and last of these.

use crate::Real;
use thiserror::Error;

/// The top-level error type used throughout vanilla-pricer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Malformed or out-of-range scalar input, detected before any
    /// computation starts.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A user-supplied payoff failed while being evaluated.
    #[error("payoff evaluation failed at terminal price {price}: {reason}")]
    PayoffEvaluation {
        /// The terminal price the payoff was evaluated at.
        price: Real,
        /// What went wrong.
        reason: String,
    },

    /// The model parameters yield an ill-defined risk-neutral probability.
    #[error("degenerate model: {0}")]
    DegenerateModel(String),
}

impl Error {
    /// Build a [`Error::PayoffEvaluation`] for the given terminal price.
    pub fn payoff(price: Real, reason: impl Into<String>) -> Self {
        Error::PayoffEvaluation {
            price,
            reason: reason.into(),
        }
    }
}

/// Shorthand `Result` type used throughout vanilla-pricer.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::InvalidParameter(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use vp_core::{ensure, errors::Error};
/// fn positive(x: f64) -> vp_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidParameter(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameter(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::DegenerateModel(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use vp_core::{ensure_model, errors::Error};
/// fn probability(p: f64) -> vp_core::errors::Result<f64> {
///     ensure_model!((0.0..=1.0).contains(&p), "probability {p} outside [0, 1]");
///     Ok(p)
/// }
/// assert!(probability(0.5).is_ok());
/// assert!(matches!(probability(1.5), Err(Error::DegenerateModel(_))));
/// ```
#[macro_export]
macro_rules! ensure_model {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::DegenerateModel(
                format!($($msg)*)
            ));
        }
    };
}
