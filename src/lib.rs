//! Monte Carlo integration by the rejection ("hit-or-miss") method.
//!
//! Uniform points are drawn from a rectangle bounding the target function on
//! `[a, b]`, and the integral is estimated as the fraction of points under the
//! curve times the rectangle's area. See [`math::monte_carlo`] for details.

pub mod error;
pub mod math;

pub use error::{Error, Result};
pub use math::{
    check_envelope, monte_carlo_integration, rejection_integration, EnvelopeViolation,
    EstimationResult, HitMissSampler, MeanValueEstimate, Peak, RejectionConfig,
    RejectionIntegrator, RunSummary, Tally,
};
