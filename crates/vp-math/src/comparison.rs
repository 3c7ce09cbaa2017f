//! Floating-point comparisons for prices and tolerances.

use vp_core::Real;

/// Absolute tolerance used when none is given.
pub const EPSILON: Real = 1e-10;

/// `|a − b| <= tolerance`.
#[inline]
pub fn close(a: Real, b: Real, tolerance: Real) -> bool {
    (a - b).abs() <= tolerance
}

/// Equal up to `n` ulps-worth of relative error, scaled by the larger
/// magnitude. Exact equality always passes, so `close_enough(0.0, 0.0, _)`
/// holds.
#[inline]
pub fn close_enough(a: Real, b: Real, n: u32) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= scale * Real::EPSILON * Real::from(n)
}

/// `|a − b| <= tolerance · |b|`, with `b` the reference value.
#[inline]
pub fn relative_close(a: Real, reference: Real, tolerance: Real) -> bool {
    (a - reference).abs() <= tolerance * reference.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute() {
        assert!(close(10.45, 10.45 + 5e-11, EPSILON));
        assert!(!close(10.45, 10.45 + 1e-9, EPSILON));
        assert!(!close(Real::NAN, Real::NAN, 1.0));
    }

    #[test]
    fn ulp_scaled() {
        assert!(close_enough(0.0, 0.0, 1));
        assert!(close_enough(100.0, 100.0 * (1.0 + 4.0 * Real::EPSILON), 5));
        assert!(!close_enough(100.0, 100.0 * (1.0 + 64.0 * Real::EPSILON), 5));
        assert!(!close_enough(0.0, 1e-300, 1000));
    }

    #[test]
    fn relative() {
        assert!(relative_close(10.47, 10.45, 0.005));
        assert!(!relative_close(10.6, 10.45, 0.005));
        assert!(relative_close(-2.0, -2.0, 0.0));
    }
}
