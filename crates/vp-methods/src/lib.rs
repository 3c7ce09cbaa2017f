//! # vp-methods
//!
//! Numerical methods: the Cox-Ross-Rubinstein recombining lattice with
//! backward induction, and terminal-value Monte Carlo under geometric
//! Brownian motion.
//!
//! # Modules
//!
//! * [`lattice`]: CRR tree and backward-induction rollback
//! * [`monte_carlo`]: terminal-price generation, discounted pricing, model
//!   orchestrator (sequential and partitioned-parallel)

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: CRR binomial tree, backward induction.
pub mod lattice;

/// Monte Carlo simulation: terminal prices, pricing, statistics.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{rollback, BinomialTree};
pub use monte_carlo::{
    DiscountedPayoffPricer, MonteCarloModel, SimulationResult, TerminalPriceGenerator,
};
