//! Binomial lattice engine for vanilla options.
//!
//! Builds a Cox-Ross-Rubinstein tree for the model and rolls the payoff back
//! with [`vp_methods::rollback`]. American exercise compares continuation
//! with intrinsic value at every node.

use vp_core::parameters::ensure_count;
use vp_core::{
    Error, ExerciseStyle, ModelParameters, OptionType, Rate, Real, Result, Size, Time, Volatility,
};
use vp_instruments::PlainVanillaPayoff;
use vp_methods::{rollback, BinomialTree};

/// Binomial (CRR) pricing engine for plain vanilla options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialVanillaEngine {
    steps: Size,
}

impl BinomialVanillaEngine {
    /// Create an engine with `steps` time steps.
    ///
    /// # Errors
    /// `InvalidParameter` if `steps` is zero.
    pub fn new(steps: Size) -> Result<Self> {
        ensure_count("steps", steps)?;
        Ok(Self { steps })
    }

    /// Number of time steps in the lattice.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Price `payoff` under `model` with the given exercise style.
    ///
    /// # Errors
    /// `DegenerateModel` if the lattice has no well-defined risk-neutral
    /// probability (zero volatility, or a drift outside the up/down range).
    pub fn calculate(
        &self,
        model: &ModelParameters,
        payoff: &PlainVanillaPayoff,
        exercise: ExerciseStyle,
    ) -> Result<Real> {
        let tree = match BinomialTree::cox_ross_rubinstein(model, self.steps) {
            Ok(tree) => tree,
            Err(e) => {
                if matches!(e, Error::DegenerateModel(_)) {
                    tracing::warn!(steps = self.steps, error = %e, "lattice rejected");
                }
                return Err(e);
            }
        };
        let discount = model.discount(tree.dt());
        let value = rollback(&tree, |s| payoff.intrinsic(s), discount, exercise);

        tracing::debug!(
            steps = self.steps,
            option_type = %payoff.option_type(),
            exercise = %exercise,
            value,
            "binomial price"
        );
        Ok(value)
    }
}

/// Price a vanilla option on a `steps`-step Cox-Ross-Rubinstein lattice.
///
/// All inputs are validated before the lattice is built.
///
/// # Errors
/// * `InvalidParameter` for `steps == 0`, negative volatility, non-positive
///   spot, strike or maturity, or any non-finite input
/// * `DegenerateModel` when the up and down moves coincide or the
///   risk-neutral probability falls outside `[0, 1]`
///
/// # Example
/// ```
/// use vp_core::{ExerciseStyle, OptionType};
/// use vp_pricingengines::binomial_option_price;
///
/// let price = binomial_option_price(
///     100.0, 100.0, 0.05, 0.2, 1.0, 500,
///     OptionType::Call, ExerciseStyle::European,
/// ).unwrap();
/// assert!((price - 10.45).abs() < 0.05);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn binomial_option_price(
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    maturity: Time,
    steps: Size,
    option_type: OptionType,
    exercise: ExerciseStyle,
) -> Result<Real> {
    let engine = BinomialVanillaEngine::new(steps)?;
    let model = ModelParameters::new(spot, risk_free_rate, volatility, maturity)?;
    let payoff = PlainVanillaPayoff::new(option_type, strike)?;
    engine.calculate(&model, &payoff, exercise)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
