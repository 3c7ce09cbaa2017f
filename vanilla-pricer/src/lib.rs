//! # vanilla-pricer
//!
//! Option pricing under Black-Scholes dynamics with two numerical engines:
//!
//! * a Cox-Ross-Rubinstein binomial lattice for European and American calls
//!   and puts, and
//! * a terminal-value Monte Carlo estimator for any payoff of the terminal
//!   price, reporting the estimate together with its standard error.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `vp-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use vanilla_pricer::core::{ExerciseStyle, OptionType};
//! use vanilla_pricer::payoff_expr::PayoffExpression;
//! use vanilla_pricer::{binomial_option_price, monte_carlo_option_price};
//!
//! let american_put = binomial_option_price(
//!     100.0, 100.0, 0.05, 0.2, 1.0, 500,
//!     OptionType::Put, ExerciseStyle::American,
//! ).unwrap();
//! assert!(american_put > 5.5);
//!
//! let capped: PayoffExpression = "min(max(s - 100, 0), 25)".parse().unwrap();
//! let result = monte_carlo_option_price(100.0, 0.05, 0.2, 1.0, 20_000, &capped).unwrap();
//! assert!(result.standard_error > 0.0);
//! let (lo, hi) = result.confidence_interval_95();
//! assert!(lo < result.estimate && result.estimate < hi);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use vp_core as core;

/// Normal distribution, random number generators, statistics.
pub use vp_math as math;

/// Payoff definitions.
pub use vp_instruments as instruments;

/// Numerical methods (binomial lattice, Monte Carlo).
pub use vp_methods as methods;

/// Pricing engines.
pub use vp_pricingengines as pricingengines;

/// Textual payoff expressions.
pub use vp_payoff_expr as payoff_expr;

pub use vp_core::{Error, Result};
pub use vp_pricingengines::{
    binomial_option_price, black_scholes_price, monte_carlo_option_price,
    monte_carlo_option_price_with_rng, SimulationResult,
};
