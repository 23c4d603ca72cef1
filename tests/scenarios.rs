use approx::assert_abs_diff_eq;
use hitmiss::{
    check_envelope, monte_carlo_integration, rejection_integration, Error, RejectionConfig,
    RejectionIntegrator,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn exp_square(x: f64) -> f64 {
    (x * x).exp()
}

fn exp_reciprocal(x: f64) -> f64 {
    x.exp() / x + (1.0 / x).exp()
}

const EXP_SQUARE_INTEGRAL: f64 = 16.452_627_765;
const EXP_RECIPROCAL_INTEGRAL: f64 = 22.591_237_573;

fn integrator(low: f64, high: f64, envelope: f64, samples: u64, seed: u64) -> RejectionIntegrator {
    let config = RejectionConfig::default()
        .with_samples(samples)
        .with_seed(seed);
    RejectionIntegrator::new(low, high, envelope, config).unwrap()
}

#[test]
fn test_exp_square_on_zero_two() {
    let result = integrator(0.0, 2.0, 4.0_f64.exp(), 4_000_000, 1)
        .integrate(&exp_square)
        .unwrap();
    // standard error is about 0.02 at this sample size
    assert_abs_diff_eq!(result.estimate, EXP_SQUARE_INTEGRAL, epsilon = 0.15);
    assert!(result.envelope_violation().is_none());
}

#[test]
fn test_exp_reciprocal_loose_envelope() {
    let result = integrator(1.0, 4.0, 100.0, 4_000_000, 2)
        .integrate(&exp_reciprocal)
        .unwrap();
    assert_abs_diff_eq!(result.estimate, EXP_RECIPROCAL_INTEGRAL, epsilon = 0.25);
    assert!(result.envelope_violation().is_none());
}

#[test]
fn test_exp_reciprocal_tight_envelope() {
    let tight = integrator(1.0, 4.0, 15.0, 4_000_000, 3)
        .integrate(&exp_reciprocal)
        .unwrap();
    let loose = integrator(1.0, 4.0, 100.0, 4_000_000, 3)
        .integrate(&exp_reciprocal)
        .unwrap();
    assert_abs_diff_eq!(tight.estimate, EXP_RECIPROCAL_INTEGRAL, epsilon = 0.06);
    assert!(tight.envelope_violation().is_none());
    assert!(tight.std_error() < loose.std_error());
}

#[test]
fn test_tight_envelope_has_lower_run_to_run_spread() {
    let tight = integrator(1.0, 4.0, 15.0, 20_000, 4)
        .repeat(&exp_reciprocal, 40)
        .unwrap();
    let loose = integrator(1.0, 4.0, 100.0, 20_000, 4)
        .repeat(&exp_reciprocal, 40)
        .unwrap();
    assert!(tight.std_dev < loose.std_dev);
    assert_abs_diff_eq!(tight.mean, EXP_RECIPROCAL_INTEGRAL, epsilon = 0.1);
}

#[test]
fn test_envelope_below_maximum_biases_low() {
    // exp(x^2) reaches e^4 at x = 2; an envelope of 20 truncates the tail
    let summary = integrator(0.0, 2.0, 20.0, 50_000, 5)
        .repeat(&exp_square, 20)
        .unwrap();
    assert!(summary.max < EXP_SQUARE_INTEGRAL);
    assert!(summary.mean + 10.0 * summary.std_error() < EXP_SQUARE_INTEGRAL);

    let result = integrator(0.0, 2.0, 20.0, 50_000, 5)
        .integrate(&exp_square)
        .unwrap();
    let violation = result.envelope_violation().unwrap();
    assert!(violation.observed > 20.0);
    assert!(violation.at > 3.0_f64.sqrt());
}

#[test]
fn test_grid_check_agrees_with_declared_envelopes() {
    assert!(check_envelope(exp_reciprocal, 1.0, 4.0, 15.0, 1_000).is_ok());
    assert!(check_envelope(exp_square, 0.0, 2.0, 4.0_f64.exp(), 1_000).is_ok());
    assert!(matches!(
        check_envelope(exp_square, 0.0, 2.0, 20.0, 1_000),
        Err(Error::EnvelopeViolation { .. })
    ));
}

#[test]
fn test_mean_value_cross_check() {
    let mut rng = StdRng::seed_from_u64(6);
    let crude = monte_carlo_integration(exp_reciprocal, 1.0, 4.0, 1_000_000, &mut rng).unwrap();
    let rejection =
        rejection_integration(exp_reciprocal, 1.0, 4.0, 15.0, 1_000_000, &mut rng).unwrap();
    let tolerance = 6.0 * (crude.std_error + rejection.std_error());
    assert_abs_diff_eq!(crude.estimate, rejection.estimate, epsilon = tolerance);
}

#[test]
fn test_invalid_inputs_fail_before_sampling() {
    let mut rng = StdRng::seed_from_u64(0);
    let calls = std::cell::Cell::new(0u32);
    let f = |x: f64| {
        calls.set(calls.get() + 1);
        x
    };
    assert!(matches!(
        rejection_integration(&f, 2.0, 2.0, 1.0, 10, &mut rng),
        Err(Error::InvalidInterval { .. })
    ));
    assert!(matches!(
        rejection_integration(&f, 0.0, 1.0, 0.0, 10, &mut rng),
        Err(Error::InvalidEnvelope(_))
    ));
    assert!(matches!(
        rejection_integration(&f, 0.0, 1.0, 1.0, 0, &mut rng),
        Err(Error::InvalidSampleCount(0))
    ));
    assert_eq!(calls.get(), 0);
}
