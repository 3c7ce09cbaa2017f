//! Validated model inputs.
//!
//! Both engines price off the same four market/model scalars. They are
//! checked once, eagerly, in [`ModelParameters::new`]; engine-specific counts
//! (`steps`, `paths`) and the strike are checked with [`ensure_count`] and
//! [`ensure_positive`] before any loop runs.

use crate::{ensure, DiscountFactor, Rate, Real, Result, Time, Volatility};

/// Spot, rate, volatility, and maturity of a single-asset Black-Scholes world.
///
/// Invariants (enforced by [`ModelParameters::new`]): every field is finite,
/// `spot > 0`, `volatility >= 0`, `maturity > 0`. The rate may be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelParameters {
    spot: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    maturity: Time,
}

impl ModelParameters {
    /// Validate and bundle the model inputs.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if any
    /// value is non-finite or out of range.
    pub fn new(
        spot: Real,
        risk_free_rate: Rate,
        volatility: Volatility,
        maturity: Time,
    ) -> Result<Self> {
        ensure_positive("spot", spot)?;
        ensure!(
            risk_free_rate.is_finite(),
            "risk-free rate must be finite, got {risk_free_rate}"
        );
        ensure!(
            volatility.is_finite() && volatility >= 0.0,
            "volatility must be finite and non-negative, got {volatility}"
        );
        ensure_positive("maturity", maturity)?;
        Ok(Self {
            spot,
            risk_free_rate,
            volatility,
            maturity,
        })
    }

    /// Current underlying price `S₀`.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Continuously compounded risk-free rate `r`.
    pub fn risk_free_rate(&self) -> Rate {
        self.risk_free_rate
    }

    /// Annualised volatility `σ`.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Time to maturity `T` in years.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Discount factor `exp(−r·t)` over a horizon `t`.
    #[inline]
    pub fn discount(&self, t: Time) -> DiscountFactor {
        (-self.risk_free_rate * t).exp()
    }

    /// Discount factor to maturity.
    #[inline]
    pub fn maturity_discount(&self) -> DiscountFactor {
        self.discount(self.maturity)
    }
}

/// Require a finite, strictly positive value.
pub fn ensure_positive(name: &str, value: Real) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "{name} must be finite and positive, got {value}"
    );
    Ok(())
}

/// Require a count (`steps`, `paths`, ...) of at least one.
pub fn ensure_count(name: &str, value: usize) -> Result<()> {
    ensure!(value >= 1, "{name} must be >= 1, got {value}");
    Ok(())
}
