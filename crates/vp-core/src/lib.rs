//! # vp-core
//!
//! Core types, error definitions, and the shared parameter-validation
//! contract for vanilla-pricer.
//!
//! Every other crate in the workspace builds on the scalar aliases, the
//! [`Error`] enum, and [`ModelParameters`] defined here.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_model!` macros.
pub mod errors;

/// Option type and exercise style enums.
pub mod option;

/// Validated market/model inputs shared by every engine.
pub mod parameters;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A continuously compounded rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor.
pub type DiscountFactor = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use option::{ExerciseStyle, OptionType};
pub use parameters::ModelParameters;
