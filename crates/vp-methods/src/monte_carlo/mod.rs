//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`TerminalPriceGenerator`]: samples `S_T` exactly from the lognormal
//!   terminal law of geometric Brownian motion (one draw per path, no time
//!   stepping)
//! * [`DiscountedPayoffPricer`]: evaluates and discounts a [`Payoff`]
//! * [`MonteCarloModel`]: runs paths and collects statistics, either on one
//!   injected generator or partitioned across `rayon` workers
//! * [`SimulationResult`]: estimate, standard error, path count

mod result;

pub use result::SimulationResult;

use rayon::prelude::*;
use vp_core::{DiscountFactor, Error, ModelParameters, Real, Result};
use vp_instruments::Payoff;
use vp_math::{stream_seed, GaussianRng, IncrementalStatistics, InverseCumulativeNormalRng};

// ─── TerminalPriceGenerator ───────────────────────────────────────────────────

/// Exact sampler of the risk-neutral terminal price.
///
/// `S_T = S₀ exp((r − σ²/2) T + σ √T Z)` with `Z ~ N(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalPriceGenerator {
    spot: Real,
    drift: Real,
    diffusion: Real,
}

impl TerminalPriceGenerator {
    /// Precompute the drift and diffusion terms for `model`.
    pub fn new(model: &ModelParameters) -> Self {
        let sigma = model.volatility();
        let t = model.maturity();
        Self {
            spot: model.spot(),
            drift: (model.risk_free_rate() - 0.5 * sigma * sigma) * t,
            diffusion: sigma * t.sqrt(),
        }
    }

    /// Terminal price for a given standard normal draw.
    #[inline]
    pub fn terminal_price(&self, z: Real) -> Real {
        self.spot * (self.drift + self.diffusion * z).exp()
    }

    /// Draw the next terminal price from `rng`.
    #[inline]
    pub fn next_price<G: GaussianRng + ?Sized>(&self, rng: &mut G) -> Real {
        self.terminal_price(rng.next_gaussian())
    }
}

// ─── DiscountedPayoffPricer ───────────────────────────────────────────────────

/// Evaluates `discount · payoff(S_T)`.
///
/// A payoff error, or a payoff that comes back non-finite, becomes
/// [`Error::PayoffEvaluation`] tagged with the offending terminal price.
pub struct DiscountedPayoffPricer<'a, P: ?Sized> {
    payoff: &'a P,
    discount: DiscountFactor,
}

impl<'a, P: Payoff + ?Sized> DiscountedPayoffPricer<'a, P> {
    /// Create a pricer with payoff and discount factor.
    pub fn new(payoff: &'a P, discount: DiscountFactor) -> Self {
        Self { payoff, discount }
    }

    /// Discounted payoff at terminal price `s`.
    pub fn value(&self, s: Real) -> Result<Real> {
        let raw = self.payoff.value(s).map_err(|e| match e {
            e @ Error::PayoffEvaluation { .. } => e,
            other => Error::payoff(s, other.to_string()),
        })?;
        if !raw.is_finite() {
            return Err(Error::payoff(s, format!("payoff returned non-finite value {raw}")));
        }
        Ok(self.discount * raw)
    }
}

// ─── MonteCarloModel ──────────────────────────────────────────────────────────

/// A Monte Carlo simulation orchestrator.
///
/// Combines the terminal-price generator with a pricer and collects
/// statistics across many simulated paths. The first failing payoff aborts
/// the run; no partial statistics are returned.
pub struct MonteCarloModel<'a, P: ?Sized> {
    generator: TerminalPriceGenerator,
    pricer: DiscountedPayoffPricer<'a, P>,
}

impl<'a, P: Payoff + ?Sized> MonteCarloModel<'a, P> {
    /// Create a model pricing `payoff` under `model`, discounted to today.
    pub fn new(model: &ModelParameters, payoff: &'a P) -> Self {
        Self {
            generator: TerminalPriceGenerator::new(model),
            pricer: DiscountedPayoffPricer::new(payoff, model.maturity_discount()),
        }
    }

    /// Run `paths` simulations drawing from `rng` and return the gathered
    /// statistics of the discounted payoffs.
    pub fn simulate<G: GaussianRng + ?Sized>(
        &self,
        paths: usize,
        rng: &mut G,
    ) -> Result<IncrementalStatistics> {
        let mut stats = IncrementalStatistics::new();
        for _ in 0..paths {
            let s_t = self.generator.next_price(rng);
            stats.add(self.pricer.value(s_t)?);
        }
        Ok(stats)
    }

    /// Run `paths` simulations split into `workers` chunks on the `rayon`
    /// pool.
    ///
    /// Chunk `i` draws from its own Mersenne Twister seeded with
    /// [`stream_seed`]`(seed, i)`, and the chunk statistics are merged in
    /// chunk order, so the result depends only on `(seed, workers)` and not
    /// on thread scheduling.
    pub fn simulate_parallel(
        &self,
        paths: usize,
        seed: u64,
        workers: usize,
    ) -> Result<IncrementalStatistics> {
        let chunks = split_paths(paths, workers);
        tracing::debug!(paths, chunks = chunks.len(), seed, "partitioned simulation");

        let partials: Vec<IncrementalStatistics> = chunks
            .par_iter()
            .enumerate()
            .map(|(i, &n)| {
                let mut rng = InverseCumulativeNormalRng::new(stream_seed(seed, i as u64));
                self.simulate(n, &mut rng)
            })
            .collect::<Result<_>>()?;

        let mut stats = IncrementalStatistics::new();
        for partial in &partials {
            stats.merge(partial);
        }
        Ok(stats)
    }
}

/// Split `paths` into at most `workers` non-empty chunks whose sizes differ
/// by at most one.
fn split_paths(paths: usize, workers: usize) -> Vec<usize> {
    let chunks = workers.max(1);
    let base = paths / chunks;
    let rem = paths % chunks;
    (0..chunks)
        .map(|i| if i < rem { base + 1 } else { base })
        .filter(|&n| n > 0)
        .collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use vp_core::OptionType;
    use vp_instruments::{PayoffFn, PlainVanillaPayoff};

    fn test_model() -> ModelParameters {
        ModelParameters::new(100.0, 0.05, 0.2, 1.0).unwrap()
    }

    #[test]
    fn terminal_price_formula() {
        let sampler = TerminalPriceGenerator::new(&test_model());
        assert_abs_diff_eq!(
            sampler.terminal_price(0.0),
            100.0 * (0.05_f64 - 0.02).exp(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            sampler.terminal_price(1.5),
            100.0 * (0.03_f64 + 0.2 * 1.5).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_volatility_is_deterministic() {
        let model = ModelParameters::new(100.0, 0.05, 0.0, 2.0).unwrap();
        let sampler = TerminalPriceGenerator::new(&model);
        let forward = 100.0 * (0.1_f64).exp();
        assert_abs_diff_eq!(sampler.terminal_price(-3.0), forward, epsilon = 1e-12);
        assert_abs_diff_eq!(sampler.terminal_price(3.0), forward, epsilon = 1e-12);
    }

    #[test]
    fn discounted_forward_is_spot() {
        // E[e^{-rT} S_T] = S₀ under the risk-neutral measure.
        let model = test_model();
        let identity = PayoffFn::new(|s: Real| s);
        let mc = MonteCarloModel::new(&model, &identity);
        let stats = mc
            .simulate(200_000, &mut InverseCumulativeNormalRng::new(42))
            .unwrap();
        let mean = stats.mean().unwrap();
        let se = stats.error_estimate().unwrap();
        assert!((mean - 100.0).abs() < 4.0 * se, "mean {mean:.4} ± {se:.4}");
    }

    #[test]
    fn mc_european_call_converges_to_bs() {
        let model = test_model();
        let call = PlainVanillaPayoff::new(OptionType::Call, 100.0).unwrap();
        let mc = MonteCarloModel::new(&model, &call);
        let stats = mc
            .simulate(100_000, &mut InverseCumulativeNormalRng::new(42))
            .unwrap();
        let r = SimulationResult::from_statistics(&stats).unwrap();

        // BS ≈ 10.4506
        assert!(
            (r.estimate - 10.4506).abs() < 3.0 * r.standard_error + 0.05,
            "MC call = {:.4} ± {:.4}",
            r.estimate,
            r.standard_error
        );
        assert!(r.standard_error > 0.0 && r.standard_error < 0.1);
    }

    #[test]
    fn failing_payoff_aborts_with_price() {
        let model = test_model();
        let picky = |s: Real| -> Result<Real> {
            if s > 120.0 {
                Err(Error::InvalidParameter("too high".into()))
            } else {
                Ok(1.0)
            }
        };
        let mc = MonteCarloModel::new(&model, &picky);
        let err = mc
            .simulate(10_000, &mut InverseCumulativeNormalRng::new(3))
            .unwrap_err();
        match err {
            Error::PayoffEvaluation { price, reason } => {
                assert!(price > 120.0);
                assert!(reason.contains("too high"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_finite_payoff_is_an_error() {
        let model = test_model();
        let nan = PayoffFn::new(|_s: Real| Real::NAN);
        let mc = MonteCarloModel::new(&model, &nan);
        assert!(matches!(
            mc.simulate(5, &mut InverseCumulativeNormalRng::new(1)),
            Err(Error::PayoffEvaluation { .. })
        ));
    }

    #[test]
    fn parallel_is_reproducible_and_consistent() {
        let model = test_model();
        let call = PlainVanillaPayoff::new(OptionType::Call, 100.0).unwrap();
        let mc = MonteCarloModel::new(&model, &call);

        let a = mc.simulate_parallel(40_001, 9, 4).unwrap();
        let b = mc.simulate_parallel(40_001, 9, 4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.samples(), 40_001);

        let mean = a.mean().unwrap();
        let se = a.error_estimate().unwrap();
        assert!((mean - 10.4506).abs() < 4.0 * se + 0.05, "{mean:.4} ± {se:.4}");
    }

    #[test]
    fn split_paths_balances() {
        assert_eq!(split_paths(10, 3), vec![4, 3, 3]);
        assert_eq!(split_paths(2, 4), vec![1, 1]);
        assert_eq!(split_paths(7, 0), vec![7]);
        assert_eq!(split_paths(12, 4).iter().sum::<usize>(), 12);
    }
}
