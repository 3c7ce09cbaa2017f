//! # vp-pricingengines
//!
//! Pricing engines for vanilla options.
//!
//! ## Engines
//!
//! - [`BinomialVanillaEngine`]: Cox-Ross-Rubinstein lattice, European or
//!   American exercise
//! - [`MonteCarloEngine`]: terminal-value simulation of any [`Payoff`]
//!   under geometric Brownian motion
//! - [`black_scholes_price`]: closed form for European options, used as the
//!   convergence benchmark
//!
//! The free functions [`binomial_option_price`] and
//! [`monte_carlo_option_price`] take raw scalars, validate them, and run the
//! corresponding engine.
//!
//! [`Payoff`]: vp_instruments::Payoff

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod monte_carlo_engine;

pub use analytic_european_engine::black_scholes_price;
pub use binomial_engine::{binomial_option_price, BinomialVanillaEngine};
pub use monte_carlo_engine::{
    monte_carlo_option_price, monte_carlo_option_price_with_rng, MonteCarloEngine,
    MonteCarloEngineBuilder, DEFAULT_PATHS, DEFAULT_SEED,
};
pub use vp_methods::SimulationResult;
