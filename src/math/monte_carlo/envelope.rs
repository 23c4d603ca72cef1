//! Envelope diagnostics.
//!
//! The rejection estimator trusts the caller's envelope height. If the function
//! rises above it anywhere on the interval, those regions are truncated and the
//! estimate is biased low. Nothing here is required for a correct run; these
//! are opt-in checks for callers who are unsure of their bound.

use crate::error::{Error, Result};
use crate::math::monte_carlo::rejection::validate_bounds;
use crate::math::monte_carlo::sampler::Peak;

/// A function value observed above the declared envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeViolation {
    /// Where the largest offending value was seen
    pub at: f64,
    /// The offending value
    pub observed: f64,
    /// The declared envelope height
    pub envelope: f64,
}

impl EnvelopeViolation {
    /// Returns a violation if `peak` lies strictly above `envelope`.
    pub fn detect(peak: Option<Peak>, envelope: f64) -> Option<Self> {
        peak.filter(|p| p.value > envelope).map(|p| Self {
            at: p.x,
            observed: p.value,
            envelope,
        })
    }

    /// How far above the envelope the function was observed.
    pub fn excess(&self) -> f64 {
        self.observed - self.envelope
    }
}

impl From<EnvelopeViolation> for Error {
    fn from(v: EnvelopeViolation) -> Self {
        Error::EnvelopeViolation {
            at: v.at,
            observed: v.observed,
            envelope: v.envelope,
        }
    }
}

/// Evaluates `f` on `points` evenly spaced abscissae spanning `[low, high]`
/// (both ends included) and checks the result against `envelope`.
///
/// Returns the largest value found (`+inf` included, NaN skipped), or
/// [`Error::EnvelopeViolation`] naming the worst grid point. A grid can miss narrow spikes, so passing
/// this check is evidence, not proof, that the envelope is valid.
///
/// # Examples
///
/// ```
/// use hitmiss::check_envelope;
///
/// let peak = check_envelope(|x: f64| x * x, 0.0, 2.0, 4.0, 101).unwrap();
/// assert_eq!(peak.value, 4.0);
///
/// assert!(check_envelope(|x: f64| x * x, 0.0, 2.0, 3.0, 101).is_err());
/// ```
pub fn check_envelope<F>(f: F, low: f64, high: f64, envelope: f64, points: usize) -> Result<Peak>
where
    F: Fn(f64) -> f64,
{
    validate_bounds(low, high, envelope)?;
    if points < 2 {
        return Err(Error::InvalidInput(format!(
            "envelope grid needs at least 2 points, got {}",
            points
        )));
    }

    let step = (high - low) / (points - 1) as f64;
    let mut peak: Option<Peak> = None;
    for i in 0..points {
        // Pin the last point to `high` so rounding never skips the endpoint
        let x = if i == points - 1 {
            high
        } else {
            low + step * i as f64
        };
        let value = f(x);
        let comparable = value.is_finite() || value == f64::INFINITY;
        if comparable && peak.map_or(true, |p| value > p.value) {
            peak = Some(Peak { x, value });
        }
    }

    let peak = peak.ok_or_else(|| {
        Error::InvalidInput("function produced no comparable value on the envelope grid".to_string())
    })?;

    match EnvelopeViolation::detect(Some(peak), envelope) {
        Some(violation) => {
            log::warn!(
                "envelope grid check failed: f({}) = {} > {}",
                violation.at,
                violation.observed,
                envelope
            );
            Err(violation.into())
        }
        None => Ok(peak),
    }
}
