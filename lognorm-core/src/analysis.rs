//! The full analysis pipeline.
//!
//! Generation → pooling → partitioning → statistics, PDF fits and QQ data.
//! Every run starts from a freshly seeded generator, so a configuration
//! always maps to the same result.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::AnalyzerConfig;
use crate::partition::{BorderOrder, GroupId, Groups};
use crate::pdf::PdfPlot;
use crate::population::{generate_populations, Pool};
use crate::qq::QqPlot;
use crate::statistics::GroupStatistics;
use crate::Result;

/// Validates `config` and runs the pipeline with a generator seeded from it.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidParameter`] for out-of-range parameters,
/// or a distribution error if fitting the combined set fails.
pub fn compute(config: &AnalyzerConfig) -> Result<Analysis> {
    Analysis::compute(config)
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct Analysis {
    config: AnalyzerConfig,
    pool: Pool,
    groups: Groups,
    statistics: [Option<GroupStatistics>; 3],
    pdf: PdfPlot,
    qq: QqPlot,
}

impl Analysis {
    /// Validates `config` and runs the pipeline with a generator seeded from it.
    ///
    /// # Errors
    ///
    /// See [`compute`].
    pub fn compute(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, &mut rng)
    }

    /// Runs the pipeline drawing samples from `rng`.
    ///
    /// Parameter ranges are not checked, so any sample count and positive
    /// log-std is accepted. `config.seed` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails, all populations are empty, or the
    /// combined set cannot be fitted.
    pub fn with_rng<R: Rng + ?Sized>(config: &AnalyzerConfig, rng: &mut R) -> Result<Self> {
        let pool = Pool::new(generate_populations(&config.populations, rng)?)?;
        let (border1, border2) = config.borders.unwrap_or_else(|| pool.default_borders());
        debug!(
            "pooled {} samples in [{}, {}], borders ({border1}, {border2})",
            pool.len(),
            pool.min(),
            pool.max()
        );

        let groups = Groups::partition(pool.combined(), border1, border2);
        if let Some(msg) = groups.border_order().warning() {
            warn!("{msg}: {border1} >= {border2}");
        }
        debug!(
            "group sizes: {} / {} / {}",
            groups.len(GroupId::One),
            groups.len(GroupId::Two),
            groups.len(GroupId::Three)
        );

        let statistics = GroupId::ALL.map(|id| GroupStatistics::from_values(groups.get(id)));
        let pdf = PdfPlot::build(&pool, &groups, config.scale)?;
        let qq = QqPlot::build(&pool, &groups);

        Ok(Self {
            config: config.clone(),
            pool,
            groups,
            statistics,
            pdf,
            qq,
        })
    }

    /// Configuration the analysis was computed from.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The generated and pooled samples.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// The three groups.
    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Borders actually used (explicit or percentile defaults).
    pub fn borders(&self) -> (f64, f64) {
        self.groups.borders()
    }

    /// Ordering state of the borders.
    pub fn border_order(&self) -> BorderOrder {
        self.groups.border_order()
    }

    /// Statistics of one group; `None` means "no data".
    pub fn statistics(&self, id: GroupId) -> Option<&GroupStatistics> {
        self.statistics[id.index()].as_ref()
    }

    /// PDF plot data.
    pub fn pdf(&self) -> &PdfPlot {
        &self.pdf
    }

    /// QQ plot data.
    pub fn qq(&self) -> &QqPlot {
        &self.qq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PopulationParams, ScaleMode};
    use crate::Error;

    #[test]
    fn test_compute_rejects_invalid_config() {
        let config = AnalyzerConfig::new().with_sample_count(5);
        assert!(matches!(
            Analysis::compute(&config),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_with_rng_accepts_small_samples() {
        let config = AnalyzerConfig::new()
            .with_population(0, PopulationParams::new(0.0, 0.5, 4))
            .with_population(1, PopulationParams::new(1.0, 0.5, 4))
            .with_population(2, PopulationParams::new(2.0, 0.5, 4))
            .with_scale(ScaleMode::Original);
        let mut rng = StdRng::seed_from_u64(3);
        let analysis = Analysis::with_rng(&config, &mut rng).unwrap();
        assert_eq!(analysis.pool().len(), 12);
        assert_eq!(analysis.groups().total_len(), 12);
        assert_eq!(analysis.config().scale, ScaleMode::Original);
    }

    #[test]
    fn test_with_rng_rejects_non_positive_std() {
        for log_std in [-0.5, 0.0] {
            let config =
                AnalyzerConfig::new().with_population(1, PopulationParams::new(1.0, log_std, 50));
            let mut rng = StdRng::seed_from_u64(3);
            assert!(matches!(
                Analysis::with_rng(&config, &mut rng),
                Err(Error::Distribution(_))
            ));
        }
    }

    #[test]
    fn test_default_view_is_original_scale() {
        let analysis = compute(&AnalyzerConfig::new()).unwrap();
        assert_eq!(analysis.config().scale, ScaleMode::Original);
        assert_eq!(analysis.pdf().title(), "PDFs in Original Scale (Log-Normal)");
        assert_eq!(analysis.pdf().x_label(), "Value");
    }

    #[test]
    fn test_default_borders_used_when_unset() {
        let analysis = compute(&AnalyzerConfig::new()).unwrap();
        let expected = analysis.pool().default_borders();
        assert_eq!(analysis.borders(), expected);
        assert_eq!(analysis.border_order(), BorderOrder::Ordered);
    }
}
