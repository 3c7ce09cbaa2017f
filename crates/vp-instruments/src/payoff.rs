//! Option payoffs.
//!
//! A payoff maps the underlying price at exercise or expiry to a cash amount.
//! Evaluation is fallible: payoffs built from user input (see the
//! `vp-payoff-expr` crate) can hit a division by zero or a domain error, and
//! the engines surface that as
//! [`Error::PayoffEvaluation`](vp_core::Error::PayoffEvaluation) instead of
//! averaging garbage.

use std::fmt;
use vp_core::parameters::ensure_positive;
use vp_core::{OptionType, Real, Result};

/// A terminal payoff `f(S)`.
///
/// Implementations must be total over prices `S >= 0`, including `S = 0`.
/// Any `Fn(Real) -> Result<Real>` closure is a `Payoff`; wrap infallible
/// closures in [`PayoffFn`].
pub trait Payoff: Send + Sync {
    /// Compute the payoff given the underlying price at exercise/expiry.
    fn value(&self, price: Real) -> Result<Real>;

    /// Human-readable name.
    fn name(&self) -> &str {
        "Custom"
    }

    /// Human-readable description.
    fn description(&self) -> String {
        self.name().to_string()
    }
}

impl<F> Payoff for F
where
    F: Fn(Real) -> Result<Real> + Send + Sync,
{
    fn value(&self, price: Real) -> Result<Real> {
        self(price)
    }
}

/// Standard "plain vanilla" European/American option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    option_type: OptionType,
    strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    ///
    /// # Errors
    /// `InvalidParameter` unless `strike` is finite and positive.
    pub fn new(option_type: OptionType, strike: Real) -> Result<Self> {
        ensure_positive("strike", strike)?;
        Ok(Self {
            option_type,
            strike,
        })
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Infallible evaluation, used where the payoff sits in a hot loop.
    #[inline]
    pub fn intrinsic(&self, price: Real) -> Real {
        self.option_type.intrinsic(price, self.strike)
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Real) -> Result<Real> {
        Ok(self.intrinsic(price))
    }

    fn name(&self) -> &str {
        "Vanilla"
    }

    fn description(&self) -> String {
        format!("{} {} @ {}", self.name(), self.option_type, self.strike)
    }
}

/// Cash-or-nothing payoff: pays a fixed amount if in the money.
///
/// `payoff = cash` if `φ(S − K) > 0`, else 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashOrNothingPayoff {
    option_type: OptionType,
    strike: Real,
    cash: Real,
}

impl CashOrNothingPayoff {
    /// Create a new cash-or-nothing payoff.
    pub fn new(option_type: OptionType, strike: Real, cash: Real) -> Result<Self> {
        ensure_positive("strike", strike)?;
        vp_core::ensure!(cash.is_finite(), "cash payoff must be finite, got {cash}");
        Ok(Self {
            option_type,
            strike,
            cash,
        })
    }
}

impl Payoff for CashOrNothingPayoff {
    fn value(&self, price: Real) -> Result<Real> {
        let in_the_money = self.option_type.sign() * (price - self.strike) > 0.0;
        Ok(if in_the_money { self.cash } else { 0.0 })
    }

    fn name(&self) -> &str {
        "CashOrNothing"
    }

    fn description(&self) -> String {
        format!(
            "{} {} @ {} paying {}",
            self.name(),
            self.option_type,
            self.strike,
            self.cash
        )
    }
}

/// Adapts an infallible closure `Fn(Real) -> Real` into a [`Payoff`].
///
/// ```
/// use vp_instruments::{Payoff, PayoffFn};
///
/// let straddle = PayoffFn::new(|s: f64| (s - 100.0).abs());
/// assert_eq!(straddle.value(90.0).unwrap(), 10.0);
/// ```
#[derive(Clone, Copy)]
pub struct PayoffFn<F>(F);

impl<F> PayoffFn<F>
where
    F: Fn(Real) -> Real + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Payoff for PayoffFn<F>
where
    F: Fn(Real) -> Real + Send + Sync,
{
    fn value(&self, price: Real) -> Result<Real> {
        Ok((self.0)(price))
    }
}

impl<F> fmt::Debug for PayoffFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PayoffFn(..)")
    }
}
