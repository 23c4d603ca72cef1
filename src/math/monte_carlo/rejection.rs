//! Rejection (hit-or-miss) Monte Carlo integration.
//!
//! Points are drawn uniformly from the rectangle `[a, b) x [0, fmax)`. A point
//! scores a hit when it lies under the curve, `y < f(x)`, and the integral is
//! estimated as the hit fraction times the rectangle area:
//!
//! ```text
//!     estimate = (hits / n) * (b - a) * fmax
//! ```
//!
//! The estimate is unbiased only if `fmax` bounds `f` from above on the whole
//! interval. Where `f(x) > fmax` every sample scores a hit, so that region is
//! truncated to `fmax` and the estimate comes out low. An envelope far above
//! the true maximum keeps the estimate unbiased but turns most samples into
//! misses, which inflates the variance.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::math::monte_carlo::envelope::EnvelopeViolation;
use crate::math::monte_carlo::sampler::{HitMissSampler, Peak, Tally};
use crate::math::monte_carlo::statistics::RunSummary;

/// Configuration for the rejection integrator.
#[derive(Debug, Clone)]
pub struct RejectionConfig {
    /// Number of hit-or-miss trials
    pub samples: u64,
    /// Seed for the internal generator. `None` draws a fresh seed per call.
    pub seed: Option<u64>,
    /// Trials per parallel work unit. Each unit gets its own random stream.
    pub batch_size: u64,
    /// Spread batches across the rayon thread pool
    pub parallel: bool,
    /// Turn an observed envelope violation into an error
    pub strict_envelope: bool,
}

impl Default for RejectionConfig {
    fn default() -> Self {
        Self {
            samples: 1_000_000,
            seed: None,
            batch_size: 65_536,
            parallel: true,
            strict_envelope: false,
        }
    }
}

impl RejectionConfig {
    /// Sets the number of trials.
    pub fn with_samples(mut self, samples: u64) -> Self {
        self.samples = samples;
        self
    }

    /// Fixes the seed, making every run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of trials per parallel batch.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Enables or disables parallel sampling.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables strict envelope checking.
    pub fn with_strict_envelope(mut self, strict: bool) -> Self {
        self.strict_envelope = strict;
        self
    }
}

/// Outcome of one rejection integration.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    /// Estimated value of the integral
    pub estimate: f64,
    /// Number of trials
    pub sample_count: u64,
    /// Height of the sampling rectangle
    pub envelope_height: f64,
    /// Lower integration bound
    pub interval_low: f64,
    /// Upper integration bound
    pub interval_high: f64,
    /// Number of trials that fell under the curve
    pub hits: u64,
    /// Largest function value seen during sampling, `+inf` included
    pub max_observed: Option<Peak>,
    /// Number of NaN or infinite function values seen during sampling
    pub non_finite: u64,
    /// Seed of the internal generator, when one was used
    pub seed: Option<u64>,
}

impl EstimationResult {
    fn from_tally(
        tally: Tally,
        low: f64,
        high: f64,
        envelope: f64,
        seed: Option<u64>,
    ) -> EstimationResult {
        let area = (high - low) * envelope;
        EstimationResult {
            estimate: tally.hits as f64 / tally.trials as f64 * area,
            sample_count: tally.trials,
            envelope_height: envelope,
            interval_low: low,
            interval_high: high,
            hits: tally.hits,
            max_observed: tally.peak,
            non_finite: tally.non_finite,
            seed,
        }
    }

    /// Fraction of trials that scored a hit.
    pub fn hit_fraction(&self) -> f64 {
        self.hits as f64 / self.sample_count as f64
    }

    /// Area of the sampling rectangle.
    pub fn area(&self) -> f64 {
        (self.interval_high - self.interval_low) * self.envelope_height
    }

    /// Binomial standard error of the estimate.
    ///
    /// Zero when every trial hit or every trial missed.
    pub fn std_error(&self) -> f64 {
        let p = self.hit_fraction();
        self.area() * (p * (1.0 - p) / self.sample_count as f64).sqrt()
    }

    /// Normal-approximation interval `estimate ± z * std_error`.
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let half_width = z * self.std_error();
        (self.estimate - half_width, self.estimate + half_width)
    }

    /// Reports a function value observed above the envelope, if any.
    pub fn envelope_violation(&self) -> Option<EnvelopeViolation> {
        EnvelopeViolation::detect(self.max_observed, self.envelope_height)
    }
}

/// Checks the interval and envelope of a rejection run.
pub(crate) fn validate_bounds(low: f64, high: f64, envelope: f64) -> Result<()> {
    if !low.is_finite() || !high.is_finite() || low >= high || !(high - low).is_finite() {
        return Err(Error::InvalidInterval { low, high });
    }
    if !envelope.is_finite() || envelope <= 0.0 || !((high - low) * envelope).is_finite() {
        return Err(Error::InvalidEnvelope(envelope));
    }
    Ok(())
}

pub(crate) fn validate_samples(samples: u64) -> Result<()> {
    if samples == 0 {
        return Err(Error::InvalidSampleCount(samples));
    }
    Ok(())
}

/// Integrates `f` over `[a, b]` by rejection sampling, drawing every random
/// number from `rng`.
///
/// # Arguments
///
/// * `f` - The function to integrate
/// * `a` - Lower bound of the interval
/// * `b` - Upper bound of the interval
/// * `fmax` - An upper bound on `f` over `[a, b]`
/// * `samples` - Number of hit-or-miss trials
/// * `rng` - Source of uniform randomness
///
/// # Examples
///
/// ```
/// use hitmiss::rejection_integration;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let result = rejection_integration(|x| x, 0.0, 1.0, 1.0, 100_000, &mut rng).unwrap();
/// assert!((result.estimate - 0.5).abs() < 0.01);
/// ```
pub fn rejection_integration<F, R>(
    f: F,
    a: f64,
    b: f64,
    fmax: f64,
    samples: u64,
    rng: &mut R,
) -> Result<EstimationResult>
where
    F: Fn(f64) -> f64,
    R: Rng + ?Sized,
{
    let config = RejectionConfig::default()
        .with_samples(samples)
        .with_parallel(false);
    RejectionIntegrator::new(a, b, fmax, config)?.integrate_with_rng(&f, rng)
}

/// A validated rejection integrator for one interval and envelope.
#[derive(Debug, Clone)]
pub struct RejectionIntegrator {
    low: f64,
    high: f64,
    envelope: f64,
    sampler: HitMissSampler,
    config: RejectionConfig,
}

impl RejectionIntegrator {
    /// Creates an integrator for `[low, high]` under an envelope of height
    /// `envelope`.
    ///
    /// Fails with [`Error::InvalidInterval`], [`Error::InvalidEnvelope`] or
    /// [`Error::InvalidSampleCount`], checked in that order, or with
    /// [`Error::InvalidInput`] for a zero batch size.
    pub fn new(low: f64, high: f64, envelope: f64, config: RejectionConfig) -> Result<Self> {
        let sampler = HitMissSampler::new(low, high, envelope)?;
        validate_samples(config.samples)?;
        if config.batch_size == 0 {
            return Err(Error::InvalidInput("batch size must be positive".to_string()));
        }
        Ok(Self {
            low,
            high,
            envelope,
            sampler,
            config,
        })
    }

    /// Returns the integrator's configuration.
    pub fn config(&self) -> &RejectionConfig {
        &self.config
    }

    /// Returns the integration interval.
    pub fn interval(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    /// Returns the envelope height.
    pub fn envelope(&self) -> f64 {
        self.envelope
    }

    fn resolve_seed(&self) -> u64 {
        self.config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen())
    }

    /// Integrates `f` with the internal seeded generator, in parallel unless
    /// the configuration says otherwise.
    pub fn integrate<F>(&self, f: &F) -> Result<EstimationResult>
    where
        F: Fn(f64) -> f64 + Sync + ?Sized,
    {
        let seed = self.resolve_seed();
        if self.config.parallel {
            self.integrate_parallel(f, seed)
        } else {
            self.integrate_sequential(f, seed)
        }
    }

    fn integrate_sequential<F>(&self, f: &F, seed: u64) -> Result<EstimationResult>
    where
        F: Fn(f64) -> f64 + ?Sized,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut result = self.integrate_with_rng(f, &mut rng)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Integrates `f` sequentially, drawing every random number from `rng`.
    pub fn integrate_with_rng<F, R>(&self, f: &F, rng: &mut R) -> Result<EstimationResult>
    where
        F: Fn(f64) -> f64 + ?Sized,
        R: Rng + ?Sized,
    {
        log::debug!(
            "rejection integration over [{}, {}] with envelope {} and {} samples",
            self.low,
            self.high,
            self.envelope,
            self.config.samples
        );
        let tally = self.sampler.sample(f, self.config.samples, rng);
        self.finish(tally, None)
    }

    /// Integrates `f` on the rayon thread pool.
    ///
    /// Trials are split into batches of `batch_size`. Batch `i` draws from a
    /// `ChaCha8Rng` seeded with `seed` on stream `i`, and the per-batch tallies
    /// are summed at the end. The result depends on `seed`, `samples` and
    /// `batch_size` only, never on the number of threads.
    pub fn integrate_parallel<F>(&self, f: &F, seed: u64) -> Result<EstimationResult>
    where
        F: Fn(f64) -> f64 + Sync + ?Sized,
    {
        let samples = self.config.samples;
        let batch_size = self.config.batch_size;
        let batches = samples.div_ceil(batch_size);
        let sampler = self.sampler;

        log::debug!(
            "parallel rejection integration over [{}, {}] with envelope {}: {} samples in {} batches, seed {}",
            self.low,
            self.high,
            self.envelope,
            samples,
            batches,
            seed
        );

        let tally = (0..batches)
            .into_par_iter()
            .map(|batch| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(batch);
                let start = batch * batch_size;
                let trials = batch_size.min(samples - start);
                sampler.sample(f, trials, &mut rng)
            })
            .reduce(Tally::default, Tally::merge);

        self.finish(tally, Some(seed))
    }

    /// Runs `runs` independent integrations and summarises their spread.
    ///
    /// Per-run seeds are drawn from a generator seeded with the configured
    /// seed, so a fixed seed makes the whole series reproducible.
    pub fn repeat<F>(&self, f: &F, runs: usize) -> Result<RunSummary>
    where
        F: Fn(f64) -> f64 + Sync + ?Sized,
    {
        if runs < 2 {
            return Err(Error::InvalidInput(format!(
                "at least 2 runs are needed to measure spread, got {}",
                runs
            )));
        }

        let mut seeder = ChaCha8Rng::seed_from_u64(self.resolve_seed());
        let estimates = (0..runs)
            .map(|_| -> Result<f64> {
                let seed: u64 = seeder.gen();
                let run = if self.config.parallel {
                    self.integrate_parallel(f, seed)?
                } else {
                    self.integrate_sequential(f, seed)?
                };
                Ok(run.estimate)
            })
            .collect::<Result<Vec<f64>>>()?;

        RunSummary::from_estimates(&estimates)
    }

    fn finish(&self, tally: Tally, seed: Option<u64>) -> Result<EstimationResult> {
        let result = EstimationResult::from_tally(tally, self.low, self.high, self.envelope, seed);

        if result.non_finite > 0 {
            log::warn!(
                "{} of {} function evaluations were not finite",
                result.non_finite,
                result.sample_count
            );
        }

        if let Some(violation) = result.envelope_violation() {
            log::warn!(
                "f({}) = {} exceeds envelope {}; estimate is biased low",
                violation.at,
                violation.observed,
                violation.envelope
            );
            if self.config.strict_envelope {
                return Err(violation.into());
            }
        }

        log::debug!(
            "rejection integration finished: {} hits of {} samples, estimate {} ± {}",
            result.hits,
            result.sample_count,
            result.estimate,
            result.std_error()
        );
        Ok(result)
    }
}
