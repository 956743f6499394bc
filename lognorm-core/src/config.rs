//! Analyzer configuration and parameter ranges.

use std::fmt;

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Valid range of a single user-adjustable parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
    /// Slider step.
    pub step: f64,
}

impl ParamRange {
    /// Samples drawn per population.
    pub const SAMPLE_COUNT: Self = Self {
        min: 300.0,
        max: 3000.0,
        step: 100.0,
    };
    /// Mean of the underlying normal distribution.
    pub const LOG_MEAN: Self = Self {
        min: -1.0,
        max: 3.0,
        step: 0.01,
    };
    /// Standard deviation of the underlying normal distribution.
    pub const LOG_STD: Self = Self {
        min: 0.1,
        max: 1.5,
        step: 0.01,
    };

    /// Returns true if `value` lies within the range (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, name: impl Into<String>, value: f64) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(Error::InvalidParameter {
                name: name.into(),
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Parameters of one log-normal population, expressed in log space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PopulationParams {
    /// Mean of `ln(x)`.
    pub log_mean: f64,
    /// Standard deviation of `ln(x)`.
    pub log_std: f64,
    /// Number of samples to draw.
    pub sample_count: usize,
}

impl PopulationParams {
    /// Default samples per population.
    pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

    /// Creates population parameters.
    pub fn new(log_mean: f64, log_std: f64, sample_count: usize) -> Self {
        Self {
            log_mean,
            log_std,
            sample_count,
        }
    }

    /// The three default populations used when the parameter controls are hidden.
    #[must_use]
    pub fn defaults() -> [Self; 3] {
        [
            Self::new(0.5, 0.4, Self::DEFAULT_SAMPLE_COUNT),
            Self::new(1.2, 0.3, Self::DEFAULT_SAMPLE_COUNT),
            Self::new(2.0, 0.35, Self::DEFAULT_SAMPLE_COUNT),
        ]
    }

    /// Checks every field against its [`ParamRange`].
    ///
    /// `index` is the zero-based population index used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for the first out-of-range field.
    pub fn validate(&self, index: usize) -> Result<()> {
        let n = index + 1;
        ParamRange::SAMPLE_COUNT.check(
            format!("sample count of population {n}"),
            crate::util::usize_to_f64(self.sample_count),
        )?;
        ParamRange::LOG_MEAN.check(format!("log mean of population {n}"), self.log_mean)?;
        ParamRange::LOG_STD.check(format!("log std of population {n}"), self.log_std)
    }
}

/// Which density view the PDF plot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScaleMode {
    /// Log-normal densities over the raw values, logarithmic x axis.
    #[default]
    Original,
    /// Normal densities over `ln(x)`, linear x axis.
    Log,
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Log => write!(f, "log"),
        }
    }
}

/// Full input of one analysis run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalyzerConfig {
    /// Population parameters, in population order.
    pub populations: [PopulationParams; 3],
    /// Seed for the pseudo-random source, reset on every run.
    pub seed: u64,
    /// Explicit border pair; `None` uses the 30th/70th percentiles.
    pub borders: Option<(f64, f64)>,
    /// PDF plot view.
    pub scale: ScaleMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            populations: PopulationParams::defaults(),
            seed: 0,
            borders: None,
            scale: ScaleMode::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets explicit border values.
    #[must_use]
    pub fn with_borders(mut self, border1: f64, border2: f64) -> Self {
        self.borders = Some((border1, border2));
        self
    }

    /// Sets the PDF view.
    #[must_use]
    pub fn with_scale(mut self, scale: ScaleMode) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the same sample count on all three populations.
    #[must_use]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        for p in &mut self.populations {
            p.sample_count = sample_count;
        }
        self
    }

    /// Replaces the parameters of one population (`index` in `0..3`).
    #[must_use]
    pub fn with_population(mut self, index: usize, params: PopulationParams) -> Self {
        if let Some(slot) = self.populations.get_mut(index) {
            *slot = params;
        }
        self
    }

    /// Checks every population parameter against its range.
    ///
    /// Border values are not checked; an inverted pair surfaces as a
    /// warning on the analysis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for the first out-of-range value.
    pub fn validate(&self) -> Result<()> {
        for (i, p) in self.populations.iter().enumerate() {
            p.validate(i)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, 0);
        assert_eq!(config.borders, None);
        assert_eq!(config.scale, ScaleMode::Original);
        assert_eq!(config.populations[2], PopulationParams::new(2.0, 0.35, 1000));
    }

    #[test]
    fn test_builder() {
        let config = AnalyzerConfig::new()
            .with_seed(42)
            .with_sample_count(500)
            .with_borders(1.0, 5.0)
            .with_scale(ScaleMode::Original)
            .with_population(1, PopulationParams::new(0.0, 1.0, 700));

        assert_eq!(config.seed, 42);
        assert_eq!(config.populations[0].sample_count, 500);
        assert_eq!(config.populations[1].sample_count, 700);
        assert_eq!(config.borders, Some((1.0, 5.0)));
        assert_eq!(config.scale, ScaleMode::Original);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = AnalyzerConfig::new().with_sample_count(10);
        match config.validate() {
            Err(Error::InvalidParameter { name, value, .. }) => {
                assert_eq!(name, "sample count of population 1");
                assert!((value - 10.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let config =
            AnalyzerConfig::new().with_population(2, PopulationParams::new(1.0, 0.05, 1000));
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { ref name, .. }) if name == "log std of population 3"
        ));

        let config =
            AnalyzerConfig::new().with_population(0, PopulationParams::new(3.5, 0.4, 1000));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_borders_are_not_a_config_error() {
        let config = AnalyzerConfig::new().with_borders(5.0, 1.0);
        assert!(config.validate().is_ok());
    }
}
