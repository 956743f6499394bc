//! Slider values for the population parameters.

use lognorm_core::PopulationParams;

/// Values of the population sliders.
///
/// One sample-count slider applies to all three populations.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationControls {
    /// Samples per population.
    pub sample_count: usize,
    /// Log mean of each population.
    pub log_means: [f64; 3],
    /// Log std dev of each population.
    pub log_stds: [f64; 3],
}

impl Default for PopulationControls {
    fn default() -> Self {
        let defaults = PopulationParams::defaults();
        Self {
            sample_count: PopulationParams::DEFAULT_SAMPLE_COUNT,
            log_means: defaults.map(|p| p.log_mean),
            log_stds: defaults.map(|p| p.log_std),
        }
    }
}

impl PopulationControls {
    /// Population parameters described by the sliders.
    pub fn populations(&self) -> [PopulationParams; 3] {
        [0, 1, 2].map(|i| {
            PopulationParams::new(self.log_means[i], self.log_stds[i], self.sample_count)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_core() {
        assert_eq!(
            PopulationControls::default().populations(),
            PopulationParams::defaults()
        );
    }

    #[test]
    fn test_sample_count_shared() {
        let controls = PopulationControls {
            sample_count: 2000,
            ..PopulationControls::default()
        };
        assert!(controls.populations().iter().all(|p| p.sample_count == 2000));
    }
}
