//! Maximum-likelihood distribution fitting.
//!
//! Both fit modes reduce to closed-form estimates on `ln(x)`:
//! a log-normal with location fixed at zero has shape `σ` and scale `e^μ`,
//! where `μ`/`σ` are the mean and population standard deviation of the
//! log data; the normal fit on log data is `(μ, σ)` directly.

use log::debug;
use statrs::distribution::{Continuous, LogNormal, Normal};

use crate::config::ScaleMode;
use crate::statistics::mean_std;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest group that receives a fitted PDF curve.
pub const MIN_FIT_SAMPLES: usize = 3;

/// Log-normal parameters in (shape, location, scale) form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogNormalFit {
    /// Standard deviation of `ln(x - loc)`.
    pub shape: f64,
    /// Location shift; always zero for fitted results.
    pub loc: f64,
    /// `exp` of the mean of `ln(x - loc)`.
    pub scale: f64,
}

impl LogNormalFit {
    /// Fits with location fixed at zero. Values must be positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySample`] for empty input and
    /// [`Error::Distribution`] if the values have no spread.
    pub fn fit(values: &[f64]) -> Result<Self> {
        let logs: Vec<f64> = values.iter().map(|v| v.ln()).collect();
        let normal = NormalFit::fit(&logs)?;
        Ok(Self {
            shape: normal.std_dev,
            loc: 0.0,
            scale: normal.mean.exp(),
        })
    }

    fn density(&self) -> Result<LogNormal> {
        Ok(LogNormal::new(self.scale.ln(), self.shape)?)
    }
}

/// Normal parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalFit {
    /// Mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl NormalFit {
    /// Maximum-likelihood fit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySample`] for empty input and
    /// [`Error::Distribution`] if the values have no spread.
    pub fn fit(values: &[f64]) -> Result<Self> {
        let (mean, std_dev) = mean_std(values).ok_or(Error::EmptySample)?;
        if !(std_dev > 0.0 && std_dev.is_finite() && mean.is_finite()) {
            return Err(Error::Distribution(format!(
                "degenerate sample: mean {mean}, std {std_dev}"
            )));
        }
        Ok(Self { mean, std_dev })
    }

    fn density(&self) -> Result<Normal> {
        Ok(Normal::new(self.mean, self.std_dev)?)
    }
}

/// A fitted model able to evaluate its density.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FitResult {
    /// Fit of raw values (original-scale view).
    LogNormal(LogNormalFit),
    /// Fit of log values (log-scale view).
    Normal(NormalFit),
}

impl FitResult {
    /// Fits the model matching `scale` to a set of raw (positive) values.
    ///
    /// In [`ScaleMode::Log`] the values are log-transformed first.
    ///
    /// # Errors
    ///
    /// See [`LogNormalFit::fit`] and [`NormalFit::fit`].
    pub fn fit(values: &[f64], scale: ScaleMode) -> Result<Self> {
        match scale {
            ScaleMode::Original => LogNormalFit::fit(values).map(Self::LogNormal),
            ScaleMode::Log => {
                let logs: Vec<f64> = values.iter().map(|v| v.ln()).collect();
                NormalFit::fit(&logs).map(Self::Normal)
            }
        }
    }

    /// Fits a group, skipping groups below [`MIN_FIT_SAMPLES`] or without spread.
    #[must_use]
    pub fn fit_group(values: &[f64], scale: ScaleMode) -> Option<Self> {
        if values.len() < MIN_FIT_SAMPLES {
            debug!("skipping fit: {} samples", values.len());
            return None;
        }
        match Self::fit(values, scale) {
            Ok(fit) => Some(fit),
            Err(e) => {
                debug!("skipping fit: {e}");
                None
            }
        }
    }

    /// Evaluates the density at every point of `xs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Distribution`] if the parameters are invalid.
    pub fn pdf(&self, xs: &[f64]) -> Result<Vec<f64>> {
        match self {
            Self::LogNormal(p) => {
                let dist = p.density()?;
                Ok(xs.iter().map(|&x| dist.pdf(x - p.loc)).collect())
            }
            Self::Normal(p) => {
                let dist = p.density()?;
                Ok(xs.iter().map(|&x| dist.pdf(x)).collect())
            }
        }
    }

    /// Mean and standard deviation of the underlying normal in log space.
    #[must_use]
    pub fn log_moments(&self) -> (f64, f64) {
        match self {
            Self::LogNormal(p) => (p.scale.ln(), p.shape),
            Self::Normal(p) => (p.mean, p.std_dev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_fit_mle() {
        let fit = NormalFit::fit(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(fit.mean, 2.5);
        assert_relative_eq!(fit.std_dev, 1.25f64.sqrt());
    }

    #[test]
    fn test_lognormal_fit_matches_log_moments() {
        let values = [0.5, 1.0, 2.0, 4.0, 8.0];
        let fit = LogNormalFit::fit(&values).unwrap();
        let logs: Vec<f64> = values.iter().map(|v: &f64| v.ln()).collect();
        let (mu, sigma) = mean_std(&logs).unwrap();
        assert_relative_eq!(fit.shape, sigma, epsilon = 1e-12);
        assert_relative_eq!(fit.scale, mu.exp(), epsilon = 1e-12);
        assert_relative_eq!(fit.loc, 0.0);
    }

    #[test]
    fn test_both_modes_agree_in_log_space() {
        let values = [0.7, 1.3, 2.2, 2.9, 5.1];
        let a = FitResult::fit(&values, ScaleMode::Original).unwrap();
        let b = FitResult::fit(&values, ScaleMode::Log).unwrap();
        let (ma, sa) = a.log_moments();
        let (mb, sb) = b.log_moments();
        assert_relative_eq!(ma, mb, epsilon = 1e-12);
        assert_relative_eq!(sa, sb, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_group_thresholds() {
        assert!(FitResult::fit_group(&[], ScaleMode::Log).is_none());
        assert!(FitResult::fit_group(&[1.0], ScaleMode::Log).is_none());
        assert!(FitResult::fit_group(&[1.0, 2.0], ScaleMode::Original).is_none());
        assert!(FitResult::fit_group(&[1.0, 2.0, 3.0], ScaleMode::Original).is_some());
        // No spread, no curve.
        assert!(FitResult::fit_group(&[2.0, 2.0, 2.0], ScaleMode::Log).is_none());
    }

    #[test]
    fn test_fit_errors() {
        assert_eq!(NormalFit::fit(&[]).unwrap_err(), Error::EmptySample);
        assert!(matches!(
            NormalFit::fit(&[1.0, 1.0]),
            Err(Error::Distribution(_))
        ));
    }

    #[test]
    fn test_pdf_values() {
        let normal = FitResult::Normal(NormalFit {
            mean: 0.0,
            std_dev: 1.0,
        });
        let ys = normal.pdf(&[0.0, 1.0]).unwrap();
        assert_relative_eq!(ys[0], 0.398_942_280_401_432_7, epsilon = 1e-12);
        assert_relative_eq!(ys[1], 0.241_970_724_519_143_37, epsilon = 1e-12);

        // Standard log-normal at x = 1 equals the standard normal at 0.
        let lognormal = FitResult::LogNormal(LogNormalFit {
            shape: 1.0,
            loc: 0.0,
            scale: 1.0,
        });
        let ys = lognormal.pdf(&[1.0]).unwrap();
        assert_relative_eq!(ys[0], 0.398_942_280_401_432_7, epsilon = 1e-12);
    }
}
