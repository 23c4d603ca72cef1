use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::Result;
use crate::math::monte_carlo::rejection::{validate_bounds, validate_samples};

/// Result of a mean-value Monte Carlo integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanValueEstimate {
    /// Estimated value of the integral
    pub estimate: f64,
    /// Standard error of the estimate
    pub std_error: f64,
    /// Number of samples
    pub samples: u64,
}

/// Performs Monte Carlo integration of the function `f` over the interval [a, b]
/// by averaging `f` at `samples` uniform points drawn from `rng`.
///
/// Unlike rejection sampling this needs no envelope, which makes it a useful
/// cross-check for a rejection estimate whose envelope is in doubt.
pub fn monte_carlo_integration<F, R>(
    f: F,
    a: f64,
    b: f64,
    samples: u64,
    rng: &mut R,
) -> Result<MeanValueEstimate>
where
    F: Fn(f64) -> f64,
    R: Rng + ?Sized,
{
    // Any positive envelope will do; only the interval is being checked
    validate_bounds(a, b, 1.0)?;
    validate_samples(samples)?;

    // Welford's running mean and sum of squared deviations
    let range = Uniform::new(a, b);
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for i in 1..=samples {
        let fx = f(range.sample(rng));
        let delta = fx - mean;
        mean += delta / i as f64;
        m2 += delta * (fx - mean);
    }

    let n = samples as f64;
    let variance = if samples > 1 { m2 / (n - 1.0) } else { 0.0 };

    Ok(MeanValueEstimate {
        estimate: (b - a) * mean,
        std_error: (b - a) * (variance / n).sqrt(),
        samples,
    })
}
