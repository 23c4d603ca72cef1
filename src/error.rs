//! Error types shared by every estimator in the crate.

use thiserror::Error;

/// Result type for integration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the Monte Carlo integrators.
///
/// Every variant except [`Error::EnvelopeViolation`] is raised before any
/// sampling happens. None of them are transient, so retrying the same call
/// will fail the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The integration interval is empty, reversed, or not finite.
    #[error("invalid interval [{low}, {high}]: bounds must be finite with low < high")]
    InvalidInterval { low: f64, high: f64 },

    /// The envelope height is not a finite positive number, or the sampling
    /// rectangle it spans has no finite area.
    #[error("invalid envelope height {0}: must be finite and strictly positive")]
    InvalidEnvelope(f64),

    /// No samples were requested.
    #[error("invalid sample count {0}: at least one sample is required")]
    InvalidSampleCount(u64),

    /// The function was observed above the declared envelope.
    ///
    /// Only returned when the caller asked for strict envelope checking or ran
    /// the grid pre-check; otherwise the condition is reported through
    /// [`EstimationResult::envelope_violation`](crate::EstimationResult::envelope_violation).
    #[error("envelope violation: f({at}) = {observed} exceeds envelope height {envelope}")]
    EnvelopeViolation { at: f64, observed: f64, envelope: f64 },

    /// Any other invalid configuration value.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns true for failures detected before sampling starts.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Error::EnvelopeViolation { .. })
    }
}
