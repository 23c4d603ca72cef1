pub mod monte_carlo;

pub use monte_carlo::{
    check_envelope, monte_carlo_integration, rejection_integration, EnvelopeViolation,
    EstimationResult, HitMissSampler, MeanValueEstimate, Peak, RejectionConfig,
    RejectionIntegrator, RunSummary, Tally,
};
