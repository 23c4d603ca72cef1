//! Command line harness for the rejection integrator.
//!
//! Runs the built-in demonstration integrands and prints each estimate with
//! its standard error and a 95% confidence interval.

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use hitmiss::{check_envelope, RejectionConfig, RejectionIntegrator};
use log::{debug, info, warn, LevelFilter};

/// z-score of a two-sided 95% normal interval
const Z_95: f64 = 1.959_963_984_540_054;

#[derive(Parser)]
#[command(name = "hitmiss")]
#[command(version)]
#[command(about = "Monte Carlo rejection integration demos", long_about = None)]
struct Cli {
    /// Integrand to run; `all` runs every demonstration with its default bounds
    #[arg(value_enum, default_value_t = Target::All)]
    target: Target,

    /// Number of hit-or-miss trials per run
    #[arg(short = 'n', long, default_value_t = 10_000_000)]
    samples: u64,

    /// Lower integration bound (single target only)
    #[arg(long, allow_hyphen_values = true)]
    low: Option<f64>,

    /// Upper integration bound (single target only)
    #[arg(long, allow_hyphen_values = true)]
    high: Option<f64>,

    /// Envelope height fmax (single target only)
    #[arg(long, allow_hyphen_values = true)]
    envelope: Option<f64>,

    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Sample on the calling thread instead of the rayon pool
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Repeat each run this many times and report the spread of the estimates
    #[arg(long)]
    runs: Option<usize>,

    /// Check the envelope on a grid with this many points before sampling
    #[arg(long)]
    check_grid: Option<usize>,

    /// Fail if the function is observed above the envelope
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// exp(x^2) on [0, 2] under fmax = e^4
    ExpSquare,
    /// exp(x)/x + exp(1/x) on [1, 4] under fmax = 100
    ExpReciprocal,
    /// x on [0, 1] under fmax = 1
    Linear,
    /// exp-square, then exp-reciprocal under fmax = 100 and under fmax = 15
    All,
}

struct Scenario {
    name: &'static str,
    f: fn(f64) -> f64,
    low: f64,
    high: f64,
    envelope: f64,
}

fn exp_square(x: f64) -> f64 {
    (x * x).exp()
}

fn exp_reciprocal(x: f64) -> f64 {
    x.exp() / x + (1.0 / x).exp()
}

fn linear(x: f64) -> f64 {
    x
}

impl Target {
    fn scenarios(self) -> Vec<Scenario> {
        let square = Scenario {
            name: "exp(x^2)",
            f: exp_square,
            low: 0.0,
            high: 2.0,
            envelope: 4.0_f64.exp(),
        };
        let reciprocal = Scenario {
            name: "exp(x)/x + exp(1/x)",
            f: exp_reciprocal,
            low: 1.0,
            high: 4.0,
            envelope: 100.0,
        };
        match self {
            Target::ExpSquare => vec![square],
            Target::ExpReciprocal => vec![reciprocal],
            Target::Linear => vec![Scenario {
                name: "x",
                f: linear,
                low: 0.0,
                high: 1.0,
                envelope: 1.0,
            }],
            Target::All => vec![
                square,
                reciprocal,
                Scenario {
                    name: "exp(x)/x + exp(1/x)",
                    f: exp_reciprocal,
                    low: 1.0,
                    high: 4.0,
                    envelope: 15.0,
                },
            ],
        }
    }
}

impl Cli {
    fn run(&self) -> hitmiss::Result<()> {
        let mut scenarios = self.target.scenarios();
        let overridden = self.low.is_some() || self.high.is_some() || self.envelope.is_some();
        if overridden && self.target == Target::All {
            warn!("--low, --high and --envelope are ignored when running all targets");
        } else if let [scenario] = scenarios.as_mut_slice() {
            scenario.low = self.low.unwrap_or(scenario.low);
            scenario.high = self.high.unwrap_or(scenario.high);
            scenario.envelope = self.envelope.unwrap_or(scenario.envelope);
        }

        let mut config = RejectionConfig::default()
            .with_samples(self.samples)
            .with_parallel(!self.sequential)
            .with_strict_envelope(self.strict);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }

        for scenario in &scenarios {
            self.run_scenario(scenario, config.clone())?;
        }
        Ok(())
    }

    fn run_scenario(&self, scenario: &Scenario, config: RejectionConfig) -> hitmiss::Result<()> {
        let f = scenario.f;
        println!(
            "integral of {} over [{}, {}], fmax = {}",
            scenario.name, scenario.low, scenario.high, scenario.envelope
        );

        if let Some(points) = self.check_grid {
            let peak = check_envelope(f, scenario.low, scenario.high, scenario.envelope, points)?;
            info!("grid maximum f({}) = {}", peak.x, peak.value);
        }

        let integrator = RejectionIntegrator::new(scenario.low, scenario.high, scenario.envelope, config)?;
        let start = Instant::now();

        match self.runs {
            Some(runs) => {
                let summary = integrator.repeat(&f, runs)?;
                println!(
                    "  {} runs: mean {:.6}, std dev {:.6}, range [{:.6}, {:.6}]",
                    summary.runs, summary.mean, summary.std_dev, summary.min, summary.max
                );
            }
            None => {
                let result = integrator.integrate(&f)?;
                let (lo, hi) = result.confidence_interval(Z_95);
                println!(
                    "  estimate {:.6} ± {:.6} (95% CI [{:.6}, {:.6}]), {} of {} hits",
                    result.estimate,
                    result.std_error(),
                    lo,
                    hi,
                    result.hits,
                    result.sample_count
                );
                if let Some(violation) = result.envelope_violation() {
                    println!(
                        "  warning: f({}) = {} exceeds fmax; estimate is biased low",
                        violation.at, violation.observed
                    );
                }
            }
        }

        debug!("{} finished in {:?}", scenario.name, start.elapsed());
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        env_logger::builder().filter_level(LevelFilter::Info).init();
        info!("Verbose output enabled (ignoring RUST_LOG environment variable)");
    } else {
        env_logger::init();
        debug!("Logging configured from environment variables");
    }

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
