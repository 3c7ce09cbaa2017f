//! # vp-instruments
//!
//! Terminal payoffs: the [`Payoff`] capability both engines evaluate, the
//! standard [`PlainVanillaPayoff`], a digital [`CashOrNothingPayoff`], and
//! [`PayoffFn`] for wrapping plain closures.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod payoff;

pub use payoff::{CashOrNothingPayoff, Payoff, PayoffFn, PlainVanillaPayoff};
pub use vp_core::{ExerciseStyle, OptionType};
