//! The hit-or-miss trial loop shared by the sequential and parallel integrators.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::Result;
use crate::math::monte_carlo::rejection::validate_bounds;

/// The largest function value seen while sampling, and where it was seen.
///
/// `+inf` counts, so an unbounded spike shows up as an envelope violation.
/// NaN and `-inf` never do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Abscissa of the observation
    pub x: f64,
    /// Function value at `x`
    pub value: f64,
}

impl Peak {
    fn max(a: Option<Peak>, b: Option<Peak>) -> Option<Peak> {
        match (a, b) {
            (Some(a), Some(b)) => Some(if b.value > a.value { b } else { a }),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

/// Partial counts from one batch of trials.
///
/// Tallies from disjoint batches combine with [`Tally::merge`], which is
/// associative and has `Tally::default()` as its identity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    /// Number of trials performed
    pub trials: u64,
    /// Number of trials where `y < f(x)`
    pub hits: u64,
    /// Number of trials where `f(x)` was NaN or infinite
    pub non_finite: u64,
    /// Largest `f(x)` observed, `+inf` included
    pub peak: Option<Peak>,
}

impl Tally {
    /// Combines two partial tallies.
    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            trials: self.trials + other.trials,
            hits: self.hits + other.hits,
            non_finite: self.non_finite + other.non_finite,
            peak: Peak::max(self.peak, other.peak),
        }
    }
}

/// Draws points uniformly from the rectangle `[low, high) x [0, envelope)`.
#[derive(Debug, Clone, Copy)]
pub struct HitMissSampler {
    x: Uniform<f64>,
    y: Uniform<f64>,
}

impl HitMissSampler {
    /// Creates a sampler over the given bounding rectangle.
    ///
    /// Fails with [`Error::InvalidInterval`](crate::Error::InvalidInterval) or
    /// [`Error::InvalidEnvelope`](crate::Error::InvalidEnvelope) for a rectangle
    /// that is empty or not finite.
    pub fn new(low: f64, high: f64, envelope: f64) -> Result<Self> {
        validate_bounds(low, high, envelope)?;
        Ok(Self {
            x: Uniform::new(low, high),
            y: Uniform::new(0.0, envelope),
        })
    }

    /// Runs `trials` independent hit-or-miss trials of `f`.
    pub fn sample<F, R>(&self, f: &F, trials: u64, rng: &mut R) -> Tally
    where
        F: Fn(f64) -> f64 + ?Sized,
        R: Rng + ?Sized,
    {
        let mut hits = 0u64;
        let mut non_finite = 0u64;
        let mut peak: Option<Peak> = None;

        for _ in 0..trials {
            let x = self.x.sample(rng);
            let y = self.y.sample(rng);
            let fx = f(x);

            if y < fx {
                hits += 1;
            }

            if !fx.is_finite() {
                non_finite += 1;
            }
            if (fx.is_finite() || fx == f64::INFINITY) && peak.map_or(true, |p| fx > p.value) {
                peak = Some(Peak { x, value: fx });
            }
        }

        Tally {
            trials,
            hits,
            non_finite,
            peak,
        }
    }
}
