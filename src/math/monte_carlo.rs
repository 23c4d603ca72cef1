//! Monte Carlo integration of one-dimensional functions.
//!
//! This module provides:
//! - Rejection (hit-or-miss) integration under a caller-supplied envelope,
//!   sequential with an injected generator or parallel over rayon
//! - Envelope diagnostics, both observed during sampling and on a dense grid
//! - Mean-value integration as an envelope-free cross-check
//! - Run-to-run spread of repeated estimates
//!
//! # Examples
//!
//! ```rust
//! use hitmiss::{RejectionConfig, RejectionIntegrator};
//!
//! let config = RejectionConfig::default().with_samples(200_000).with_seed(7);
//! let integrator = RejectionIntegrator::new(0.0, 2.0, 4.0_f64.exp(), config).unwrap();
//! let result = integrator.integrate(&|x: f64| (x * x).exp()).unwrap();
//! assert!((result.estimate - 16.45).abs() < 1.0);
//! ```

pub mod envelope;
pub mod monte_carlo_integration;
pub mod rejection;
pub mod sampler;
pub mod statistics;

pub use envelope::{check_envelope, EnvelopeViolation};
pub use monte_carlo_integration::{monte_carlo_integration, MeanValueEstimate};
pub use rejection::{rejection_integration, EstimationResult, RejectionConfig, RejectionIntegrator};
pub use sampler::{HitMissSampler, Peak, Tally};
pub use statistics::RunSummary;
