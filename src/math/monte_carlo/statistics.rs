use crate::error::{Error, Result};

/// Spread of estimates across repeated independent runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Number of runs
    pub runs: usize,
    /// Mean of the estimates
    pub mean: f64,
    /// Unbiased (n - 1) sample variance of the estimates
    pub variance: f64,
    /// Square root of `variance`
    pub std_dev: f64,
    /// Smallest estimate
    pub min: f64,
    /// Largest estimate
    pub max: f64,
}

impl RunSummary {
    /// Summarises a series of estimates. At least two are required.
    pub fn from_estimates(estimates: &[f64]) -> Result<Self> {
        let runs = estimates.len();
        if runs < 2 {
            return Err(Error::InvalidInput(format!(
                "at least 2 estimates are needed to measure spread, got {}",
                runs
            )));
        }

        let mean = estimates.iter().sum::<f64>() / runs as f64;
        let variance = estimates
            .iter()
            .map(|&e| (e - mean) * (e - mean))
            .sum::<f64>()
            / (runs - 1) as f64;
        let min = estimates.iter().copied().fold(f64::INFINITY, f64::min);
        let max = estimates.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            runs,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }

    /// Standard error of `mean`.
    pub fn std_error(&self) -> f64 {
        self.std_dev / (self.runs as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary() {
        let summary = RunSummary::from_estimates(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(summary.runs, 8);
        assert_relative_eq!(summary.mean, 5.0);
        assert_relative_eq!(summary.variance, 32.0 / 7.0);
        assert_relative_eq!(summary.std_dev, (32.0f64 / 7.0).sqrt());
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_relative_eq!(summary.std_error(), (32.0f64 / 7.0 / 8.0).sqrt());
    }

    #[test]
    fn test_identical_estimates_have_no_spread() {
        let summary = RunSummary::from_estimates(&[1.5, 1.5, 1.5]).unwrap();
        assert_eq!(summary.variance, 0.0);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_too_few_estimates() {
        assert!(matches!(
            RunSummary::from_estimates(&[1.0]),
            Err(Error::InvalidInput(_))
        ));
        assert!(RunSummary::from_estimates(&[]).is_err());
    }
}
