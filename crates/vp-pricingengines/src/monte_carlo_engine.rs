//! Monte Carlo engine for arbitrary terminal payoffs.
//!
//! Samples the terminal price of geometric Brownian motion exactly (one
//! normal draw per path), discounts the payoff, and reports the sample mean
//! with its standard error.
//!
//! The engine is configured through [`MonteCarloEngine::builder`]. The free
//! functions [`monte_carlo_option_price`] and
//! [`monte_carlo_option_price_with_rng`] cover the common single-call use.

use vp_core::parameters::ensure_count;
use vp_core::{Error, ModelParameters, Rate, Real, Result, Size, Time, Volatility};
use vp_instruments::Payoff;
use vp_math::{GaussianRng, IncrementalStatistics, InverseCumulativeNormalRng};
use vp_methods::{MonteCarloModel, SimulationResult};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Path count used when none is configured.
pub const DEFAULT_PATHS: Size = 100_000;

// ─── MonteCarloEngine ─────────────────────────────────────────────────────────

/// Monte Carlo pricing engine.
///
/// With `workers == 1` all paths are drawn from one Mersenne Twister seeded
/// with `seed`. With more workers the paths are split into `workers` chunks
/// priced on the `rayon` pool, each chunk on its own derived stream; the
/// result is reproducible for a fixed `(seed, workers)`.
///
/// # Example
/// ```
/// use vp_core::{ModelParameters, OptionType};
/// use vp_instruments::PlainVanillaPayoff;
/// use vp_pricingengines::MonteCarloEngine;
///
/// let engine = MonteCarloEngine::builder()
///     .paths(50_000)
///     .seed(7)
///     .build()
///     .unwrap();
/// let model = ModelParameters::new(100.0, 0.05, 0.2, 1.0).unwrap();
/// let call = PlainVanillaPayoff::new(OptionType::Call, 100.0).unwrap();
/// let result = engine.calculate(&model, &call).unwrap();
/// assert!(result.contains(10.4506, 4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloEngine {
    paths: Size,
    seed: u64,
    workers: usize,
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self {
            paths: DEFAULT_PATHS,
            seed: DEFAULT_SEED,
            workers: 1,
        }
    }
}

impl MonteCarloEngine {
    /// Start configuring an engine.
    pub fn builder() -> MonteCarloEngineBuilder {
        MonteCarloEngineBuilder::default()
    }

    /// Number of simulated paths.
    pub fn paths(&self) -> Size {
        self.paths
    }

    /// Base seed of the random stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of parallel chunks (1 = sequential).
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Price `payoff` under `model` using the configured random stream.
    ///
    /// # Errors
    /// `PayoffEvaluation` if the payoff fails or returns a non-finite value
    /// on any path.
    pub fn calculate<P>(&self, model: &ModelParameters, payoff: &P) -> Result<SimulationResult>
    where
        P: Payoff + ?Sized,
    {
        let mc = MonteCarloModel::new(model, payoff);
        let stats = if self.workers > 1 {
            mc.simulate_parallel(self.paths, self.seed, self.workers)
        } else {
            mc.simulate(self.paths, &mut InverseCumulativeNormalRng::new(self.seed))
        };
        self.summarise(payoff, stats)
    }

    /// Price `payoff` under `model`, drawing every normal variate from
    /// `rng`. The configured seed and worker count are ignored.
    pub fn calculate_with_rng<P, G>(
        &self,
        model: &ModelParameters,
        payoff: &P,
        rng: &mut G,
    ) -> Result<SimulationResult>
    where
        P: Payoff + ?Sized,
        G: GaussianRng + ?Sized,
    {
        let stats = MonteCarloModel::new(model, payoff).simulate(self.paths, rng);
        self.summarise(payoff, stats)
    }

    fn summarise<P: Payoff + ?Sized>(
        &self,
        payoff: &P,
        stats: Result<IncrementalStatistics>,
    ) -> Result<SimulationResult> {
        let stats = match stats {
            Ok(stats) => stats,
            Err(e) => {
                if let Error::PayoffEvaluation { price, reason } = &e {
                    tracing::warn!(payoff = payoff.name(), price, %reason, "payoff failed");
                }
                return Err(e);
            }
        };
        let result = SimulationResult::from_statistics(&stats)?;
        tracing::debug!(
            payoff = payoff.name(),
            paths = result.paths,
            workers = self.workers,
            estimate = result.estimate,
            standard_error = result.standard_error,
            "monte carlo price"
        );
        Ok(result)
    }
}

// ─── Builder ──────────────────────────────────────────────────────────────────

/// Builder for [`MonteCarloEngine`]; settings are validated by
/// [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngineBuilder {
    paths: Option<Size>,
    seed: Option<u64>,
    workers: Option<usize>,
}

impl MonteCarloEngineBuilder {
    /// Number of simulated paths (default [`DEFAULT_PATHS`]).
    pub fn paths(mut self, paths: Size) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Base seed (default [`DEFAULT_SEED`]).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of parallel chunks (default 1).
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Validate and build the engine.
    ///
    /// # Errors
    /// `InvalidParameter` if `paths` or `workers` is zero.
    pub fn build(self) -> Result<MonteCarloEngine> {
        let paths = self.paths.unwrap_or(DEFAULT_PATHS);
        let workers = self.workers.unwrap_or(1);
        ensure_count("paths", paths)?;
        ensure_count("workers", workers)?;
        Ok(MonteCarloEngine {
            paths,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            workers,
        })
    }
}

// ─── Free functions ───────────────────────────────────────────────────────────

/// Estimate the price of `payoff` by simulating `paths` terminal prices
/// from a Mersenne Twister seeded with [`DEFAULT_SEED`].
///
/// # Errors
/// * `InvalidParameter` for `paths == 0`, negative volatility, non-positive
///   spot or maturity, or any non-finite input
/// * `PayoffEvaluation` if the payoff fails on any path
///
/// # Example
/// ```
/// use vp_core::Real;
/// use vp_instruments::PayoffFn;
/// use vp_pricingengines::monte_carlo_option_price;
///
/// let call = PayoffFn::new(|s: Real| (s - 100.0).max(0.0));
/// let r = monte_carlo_option_price(100.0, 0.05, 0.2, 1.0, 100_000, &call).unwrap();
/// assert!((r.estimate - 10.45).abs() < 4.0 * r.standard_error);
/// ```
pub fn monte_carlo_option_price<P>(
    spot: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    maturity: Time,
    paths: Size,
    payoff: &P,
) -> Result<SimulationResult>
where
    P: Payoff + ?Sized,
{
    let engine = MonteCarloEngine::builder().paths(paths).build()?;
    let model = ModelParameters::new(spot, risk_free_rate, volatility, maturity)?;
    engine.calculate(&model, payoff)
}

/// As [`monte_carlo_option_price`], drawing the normal variates from `rng`.
pub fn monte_carlo_option_price_with_rng<P, G>(
    spot: Real,
    risk_free_rate: Rate,
    volatility: Volatility,
    maturity: Time,
    paths: Size,
    payoff: &P,
    rng: &mut G,
) -> Result<SimulationResult>
where
    P: Payoff + ?Sized,
    G: GaussianRng + ?Sized,
{
    let engine = MonteCarloEngine::builder().paths(paths).build()?;
    let model = ModelParameters::new(spot, risk_free_rate, volatility, maturity)?;
    engine.calculate_with_rng(&model, payoff, rng)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
