//! Population generation and pooling.

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, LogNormal};

use crate::config::PopulationParams;
use crate::util::usize_to_f64;
use crate::{Error, Result};

/// Percentile used for the default lower border.
pub const DEFAULT_BORDER1_PERCENTILE: f64 = 30.0;
/// Percentile used for the default upper border.
pub const DEFAULT_BORDER2_PERCENTILE: f64 = 70.0;

/// Draws one sample set per population from a log-normal distribution.
///
/// Populations are drawn in order from the same generator, so a seeded
/// `rng` makes the output fully deterministic.
///
/// # Errors
///
/// Returns [`Error::Distribution`] if a population has a non-finite mean
/// or a standard deviation that is not strictly positive and finite.
pub fn generate_populations<R: Rng + ?Sized>(
    params: &[PopulationParams; 3],
    rng: &mut R,
) -> Result<[Vec<f64>; 3]> {
    let mut out: [Vec<f64>; 3] = Default::default();
    for (slot, p) in out.iter_mut().zip(params) {
        if !p.log_mean.is_finite() {
            return Err(Error::Distribution(format!(
                "log mean must be finite, got {}",
                p.log_mean
            )));
        }
        if !(p.log_std > 0.0 && p.log_std.is_finite()) {
            return Err(Error::Distribution(format!(
                "log std must be positive and finite, got {}",
                p.log_std
            )));
        }
        let dist = LogNormal::new(p.log_mean, p.log_std)?;
        *slot = dist.sample_iter(&mut *rng).take(p.sample_count).collect();
        debug!(
            "generated {} samples (log mean {}, log std {})",
            p.sample_count, p.log_mean, p.log_std
        );
    }
    Ok(out)
}

/// Percentile of `data` using linear interpolation between closest ranks.
///
/// `p` is in percent and clamped to `[0, 100]`. Returns `None` for empty input.
#[must_use]
pub fn percentile(data: &[f64], p: f64) -> Option<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = p.clamp(0.0, 100.0) / 100.0 * last as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(last);
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// The three sample sets and their concatenation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    populations: [Vec<f64>; 3],
    combined: Vec<f64>,
    sorted: Vec<f64>,
}

impl Pool {
    /// Concatenates the populations in population order, then sample order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySample`] if all three populations are empty.
    pub fn new(populations: [Vec<f64>; 3]) -> Result<Self> {
        let combined: Vec<f64> = populations.iter().flatten().copied().collect();
        if combined.is_empty() {
            return Err(Error::EmptySample);
        }
        let mut sorted = combined.clone();
        sorted.sort_by(f64::total_cmp);
        Ok(Self {
            populations,
            combined,
            sorted,
        })
    }

    /// The individual sample sets.
    pub fn populations(&self) -> &[Vec<f64>; 3] {
        &self.populations
    }

    /// The combined set, in generation order.
    pub fn combined(&self) -> &[f64] {
        &self.combined
    }

    /// The combined set sorted ascending.
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    /// Natural log of every combined value, in generation order.
    pub fn log_combined(&self) -> Vec<f64> {
        self.combined.iter().map(|v| v.ln()).collect()
    }

    /// Number of pooled samples.
    pub fn len(&self) -> usize {
        self.combined.len()
    }

    /// Always false; an empty pool cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }

    /// Smallest pooled value.
    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    /// Largest pooled value.
    pub fn max(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    /// `(min, max)` of the pooled values; the range of the border controls.
    pub fn value_range(&self) -> (f64, f64) {
        (self.min(), self.max())
    }

    /// Percentile of the pooled values.
    pub fn percentile(&self, p: f64) -> f64 {
        percentile_sorted(&self.sorted, p).unwrap_or(f64::NAN)
    }

    /// Default borders: the 30th and 70th percentiles.
    pub fn default_borders(&self) -> (f64, f64) {
        (
            self.percentile(DEFAULT_BORDER1_PERCENTILE),
            self.percentile(DEFAULT_BORDER2_PERCENTILE),
        )
    }

    /// Fraction of pooled log-values strictly below `ln(value)`.
    ///
    /// This is the insertion position of `ln(value)` in the sorted log
    /// data (leftmost) divided by the pool size.
    pub fn log_rank_fraction(&self, value: f64) -> f64 {
        let target = value.ln();
        let pos = self.sorted.partition_point(|v| v.ln() < target);
        usize_to_f64(pos) / usize_to_f64(self.sorted.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_percentile_interpolates() {
        let data = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_relative_eq!(percentile(&data, 0.0).unwrap(), 1.0);
        assert_relative_eq!(percentile(&data, 50.0).unwrap(), 3.0);
        assert_relative_eq!(percentile(&data, 100.0).unwrap(), 5.0);
        // rank 0.3 * 4 = 1.2 -> 2.0 + 0.2 * 1.0
        assert_relative_eq!(percentile(&data, 30.0).unwrap(), 2.2, epsilon = 1e-12);
        assert_relative_eq!(percentile(&[7.0], 70.0).unwrap(), 7.0);
        assert!(percentile(&[], 50.0).is_none());
    }

    #[test]
    fn test_generate_populations_sizes_and_positivity() {
        let params = [
            PopulationParams::new(0.0, 0.5, 10),
            PopulationParams::new(1.0, 0.2, 1),
            PopulationParams::new(2.0, 1.0, 25),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let pops = generate_populations(&params, &mut rng).unwrap();
        assert_eq!(pops[0].len(), 10);
        assert_eq!(pops[1].len(), 1);
        assert_eq!(pops[2].len(), 25);
        assert!(pops.iter().flatten().all(|&v| v > 0.0));
    }

    #[test]
    fn test_generate_populations_rejects_non_positive_std() {
        for bad in [-0.5, 0.0, f64::NAN, f64::INFINITY] {
            let params = [
                PopulationParams::new(0.0, 0.5, 10),
                PopulationParams::new(1.0, bad, 10),
                PopulationParams::new(2.0, 1.0, 10),
            ];
            let mut rng = StdRng::seed_from_u64(7);
            assert!(
                matches!(
                    generate_populations(&params, &mut rng),
                    Err(Error::Distribution(_))
                ),
                "log std {bad} accepted"
            );
        }
    }

    #[test]
    fn test_generate_populations_rejects_non_finite_mean() {
        let params = [
            PopulationParams::new(f64::NAN, 0.5, 10),
            PopulationParams::new(1.0, 0.2, 10),
            PopulationParams::new(2.0, 1.0, 10),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            generate_populations(&params, &mut rng),
            Err(Error::Distribution(_))
        ));
    }

    #[test]
    fn test_pool_preserves_order() {
        let pool = Pool::new([vec![3.0, 1.0], vec![], vec![2.0]]).unwrap();
        assert_eq!(pool.combined(), &[3.0, 1.0, 2.0]);
        assert_eq!(pool.sorted(), &[1.0, 2.0, 3.0]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.value_range(), (1.0, 3.0));
    }

    #[test]
    fn test_empty_pool_is_error() {
        assert_eq!(
            Pool::new([vec![], vec![], vec![]]).unwrap_err(),
            Error::EmptySample
        );
    }

    #[test]
    fn test_log_rank_fraction() {
        let pool = Pool::new([vec![1.0, 2.0], vec![3.0, 4.0], vec![]]).unwrap();
        assert_relative_eq!(pool.log_rank_fraction(0.5), 0.0);
        assert_relative_eq!(pool.log_rank_fraction(1.0), 0.0);
        assert_relative_eq!(pool.log_rank_fraction(2.5), 0.5);
        assert_relative_eq!(pool.log_rank_fraction(3.0), 0.5);
        assert_relative_eq!(pool.log_rank_fraction(10.0), 1.0);
    }
}
