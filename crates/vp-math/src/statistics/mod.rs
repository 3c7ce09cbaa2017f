//! Streaming statistics accumulator.

use vp_core::Real;

/// Incremental statistics accumulator.
///
/// Running mean and sum of squared deviations (Welford), so a long stream of
/// similar payoffs does not lose precision the way raw `Σx²` does. Two
/// accumulators built on disjoint samples can be [merged](Self::merge), which
/// is how partitioned simulations combine their workers.
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementalStatistics {
    count: usize,
    mean: Real,
    m2: Real,
    min: Real,
    max: Real,
}

impl Default for IncrementalStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalStatistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: Real::INFINITY,
            max: Real::NEG_INFINITY,
        }
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as Real;
        self.m2 += delta * (x - self.mean);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// Fold another accumulator's samples into this one.
    pub fn merge(&mut self, other: &IncrementalStatistics) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let n_a = self.count as Real;
        let n_b = other.count as Real;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean.  Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased (Bessel-corrected) variance.  Returns `None` for fewer than
    /// 2 samples.
    pub fn variance(&self) -> Option<Real> {
        (self.count >= 2).then(|| (self.m2 / (self.count - 1) as Real).max(0.0))
    }

    /// Standard deviation.  Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean, `σ / √n`.  Returns `None` for fewer than
    /// 2 samples.
    pub fn error_estimate(&self) -> Option<Real> {
        self.variance().map(|v| (v / self.count as Real).sqrt())
    }

    /// Minimum sample value.  Returns `None` if no samples have been added.
    pub fn minimum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.min)
    }

    /// Maximum sample value.  Returns `None` if no samples have been added.
    pub fn maximum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.max)
    }

    /// Reset the accumulator to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Extend<Real> for IncrementalStatistics {
    fn extend<I: IntoIterator<Item = Real>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<Real> for IncrementalStatistics {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn basic_statistics() {
        let s: IncrementalStatistics = [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().collect();
        assert_eq!(s.samples(), 5);
        assert_abs_diff_eq!(s.mean().unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.variance().unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.std_dev().unwrap(), 2.5_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(s.error_estimate().unwrap(), 0.5_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(s.minimum(), Some(1.0));
        assert_eq!(s.maximum(), Some(5.0));
    }

    #[test]
    fn empty_and_single() {
        let mut s = IncrementalStatistics::new();
        assert!(s.mean().is_none());
        assert!(s.variance().is_none());
        s.add(4.0);
        assert_eq!(s.mean(), Some(4.0));
        assert!(s.error_estimate().is_none());
        s.reset();
        assert_eq!(s.samples(), 0);
    }

    #[test]
    fn large_offset_keeps_precision() {
        // Σx² would cancel catastrophically here.
        let s: IncrementalStatistics = [1e9 + 4.0, 1e9 + 7.0, 1e9 + 13.0, 1e9 + 16.0]
            .into_iter()
            .collect();
        assert_abs_diff_eq!(s.variance().unwrap(), 30.0, epsilon = 1e-6);
    }

    proptest! {
        #[test]
        fn merge_matches_single_pass(
            xs in prop::collection::vec(-1e3f64..1e3, 2..60),
            split in 0usize..60,
        ) {
            let split = split.min(xs.len());
            let whole: IncrementalStatistics = xs.iter().copied().collect();
            let mut left: IncrementalStatistics = xs[..split].iter().copied().collect();
            let right: IncrementalStatistics = xs[split..].iter().copied().collect();
            left.merge(&right);

            prop_assert_eq!(left.samples(), whole.samples());
            prop_assert!((left.mean().unwrap() - whole.mean().unwrap()).abs() < 1e-9);
            prop_assert!((left.variance().unwrap() - whole.variance().unwrap()).abs() < 1e-6);
            prop_assert_eq!(left.minimum(), whole.minimum());
            prop_assert_eq!(left.maximum(), whole.maximum());
        }
    }
}
