//! Cox-Ross-Rubinstein recombining binomial tree.
//!
//! | Quantity | Value |
//! |---|---|
//! | step | `Δt = T / n` |
//! | up factor | `u = exp(σ √Δt)` |
//! | down factor | `d = 1 / u` |
//! | up probability | `p = (exp(r Δt) − d) / (u − d)` |
//!
//! Node `(i, j)` is reached after `j` up-moves and `i − j` down-moves, so its
//! underlying value is `S₀ uʲ d^(i−j)`. Because `d = 1/u` this is
//! `S₀ exp((2j − i) σ √Δt)`, which is how it is evaluated here.
//!
//! Very large `n`, or a very large `σ √Δt`, pushes the extreme nodes past the
//! `f64` range; those nodes saturate to `0` or `∞` under IEEE semantics and
//! no attempt is made to rescue them.

use vp_core::parameters::ensure_count;
use vp_core::{ensure_model, ModelParameters, Real, Result, Size, Time};

/// A recombining CRR binomial tree.
///
/// The tree has `steps + 1` time layers, with layer `i` having `i + 1` nodes.
/// Nothing is materialised: node values are computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTree {
    x0: Real,
    dt: Time,
    steps: Size,
    log_up: Real,
    up: Real,
    down: Real,
    pu: Real,
    pd: Real,
}

impl BinomialTree {
    /// Build the CRR tree for `model` over `steps` layers.
    ///
    /// # Errors
    /// * `InvalidParameter` if `steps == 0`.
    /// * `DegenerateModel` if `u == d` (zero volatility, or `σ √Δt`
    ///   vanishing in floating point), or if the risk-neutral probability is
    ///   not a number in `[0, 1]`, i.e. `exp(r Δt)` falls outside `[d, u]`.
    pub fn cox_ross_rubinstein(model: &ModelParameters, steps: Size) -> Result<Self> {
        ensure_count("steps", steps)?;

        let dt = model.maturity() / steps as Real;
        let log_up = model.volatility() * dt.sqrt();
        let up = log_up.exp();
        let down = 1.0 / up;
        let spread = up - down;
        ensure_model!(
            spread.is_finite() && spread > 0.0,
            "CRR: up factor {up} and down factor {down} coincide \
             (volatility {}, dt {dt}); risk-neutral probability undefined",
            model.volatility()
        );

        let growth = (model.risk_free_rate() * dt).exp();
        let pu = (growth - down) / spread;
        ensure_model!(
            pu.is_finite() && (0.0..=1.0).contains(&pu),
            "CRR: risk-neutral probability {pu} outside [0, 1] \
             (growth {growth}, down {down}, up {up}); try more steps"
        );

        tracing::debug!(steps, dt, up, down, probability = pu, "built CRR tree");

        Ok(Self {
            x0: model.spot(),
            dt,
            steps,
            log_up,
            up,
            down,
            pu,
            pd: 1.0 - pu,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Initial underlying value (spot price).
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Multiplicative up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Multiplicative down factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Number of nodes at time step `i` (always `i + 1` for a binomial tree).
    pub fn size(&self, i: Size) -> Size {
        i + 1
    }

    /// Index of the descendant node at step `i+1` for a given `branch`.
    ///
    /// `branch = 0` → down, `branch = 1` → up.
    pub fn descendant(&self, _i: Size, index: Size, branch: Size) -> Size {
        index + branch
    }

    /// Underlying value at node `(i, index)`.
    pub fn underlying(&self, i: Size, index: Size) -> Real {
        let moves = 2.0 * index as Real - i as Real;
        self.x0 * (moves * self.log_up).exp()
    }

    /// Risk-neutral transition probability for `branch` (0 = down, 1 = up).
    pub fn probability(&self, branch: Size) -> Real {
        if branch == 1 {
            self.pu
        } else {
            self.pd
        }
    }
}
