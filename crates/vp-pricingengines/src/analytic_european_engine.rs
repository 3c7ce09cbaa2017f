//! Analytic European option price (Black-Scholes).
//!
//! $$C = S N(d_1) - K e^{-rT} N(d_2)$$
//! $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
//!
//! where $d_{1,2} = \frac{\ln(S/K) + (r \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
//!
//! The lattice and Monte Carlo engines are checked against this.

use vp_core::{OptionType, Rate, Real, Time, Volatility};
use vp_math::normal_cdf;

/// Black-Scholes price of a European option on a non-dividend-paying asset.
///
/// Degenerate inputs fall back to their limits: `T <= 0` gives intrinsic
/// value, and a vanishing `σ√T` gives the discounted intrinsic value of the
/// forward.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return option_type.intrinsic(spot, strike);
    }

    let df = (-risk_free_rate * t).exp();
    let std_dev = volatility * t.sqrt();

    if std_dev <= 1e-15 {
        return (phi * (spot - strike * df)).max(0.0);
    }

    let d1 = ((spot / strike).ln() + (risk_free_rate + 0.5 * volatility * volatility) * t)
        / std_dev;
    let d2 = d1 - std_dev;

    phi * (spot * normal_cdf(phi * d1) - strike * df * normal_cdf(phi * d2))
}
