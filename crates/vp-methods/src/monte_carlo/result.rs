use vp_core::{Error, Real, Result};
use vp_math::IncrementalStatistics;

/// Outcome of a Monte Carlo pricing run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Sample mean of the discounted payoffs.
    pub estimate: Real,
    /// Sample standard deviation over `√paths`; `0` for a single path.
    pub standard_error: Real,
    /// Number of simulated paths.
    pub paths: usize,
}

impl SimulationResult {
    /// Summarise the discounted-payoff statistics of a finished run.
    ///
    /// # Errors
    /// `InvalidParameter` if the accumulator holds no samples.
    pub fn from_statistics(stats: &IncrementalStatistics) -> Result<Self> {
        let estimate = stats
            .mean()
            .ok_or_else(|| Error::InvalidParameter("no paths were simulated".into()))?;
        Ok(Self {
            estimate,
            standard_error: stats.error_estimate().unwrap_or(0.0),
            paths: stats.samples(),
        })
    }

    /// `(estimate − z·se, estimate + z·se)`.
    pub fn confidence_interval(&self, z: Real) -> (Real, Real) {
        let half_width = z * self.standard_error;
        (self.estimate - half_width, self.estimate + half_width)
    }

    /// Two-sided 95% normal confidence interval.
    pub fn confidence_interval_95(&self) -> (Real, Real) {
        self.confidence_interval(1.959_963_984_540_054)
    }

    /// Whether `value` lies within `z` standard errors of the estimate.
    pub fn contains(&self, value: Real, z: Real) -> bool {
        let (lo, hi) = self.confidence_interval(z);
        (lo..=hi).contains(&value)
    }
}
