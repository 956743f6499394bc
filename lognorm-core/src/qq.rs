//! Normal quantile-quantile data for log-transformed samples.

use std::f64::consts::SQRT_2;

use log::debug;
use statrs::function::erf::erfc_inv;

use crate::partition::Groups;
use crate::pdf::Series;
use crate::population::Pool;
use crate::util::usize_to_f64;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest series that is drawn on the QQ plot.
pub const MIN_QQ_SAMPLES: usize = 2;

/// Inverse CDF of the standard normal distribution.
///
/// Returns `-inf`/`+inf` at `p = 0`/`p = 1` and NaN outside `[0, 1]`.
#[must_use]
pub fn std_normal_ppf(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Filliben's estimate of the uniform order-statistic medians for `n` points.
#[must_use]
pub fn order_statistic_medians(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let nf = usize_to_f64(n);
    let last = 0.5f64.powf(1.0 / nf);
    (1..=n)
        .map(|i| {
            if i == 1 {
                1.0 - last
            } else if i == n {
                last
            } else {
                (usize_to_f64(i) - 0.3175) / (nf + 0.365)
            }
        })
        .collect()
}

/// Theoretical standard-normal quantiles for `n` sorted samples.
#[must_use]
pub fn theoretical_quantiles(n: usize) -> Vec<f64> {
    order_statistic_medians(n)
        .into_iter()
        .map(std_normal_ppf)
        .collect()
}

/// Ordinary least squares `y = slope * x + intercept` and correlation `r`.
///
/// Returns `None` when fewer than two points or all `x` are equal.
/// A sample without spread in `y` has `r = 0`.
#[must_use]
pub fn least_squares(xs: &[f64], ys: &[f64]) -> Option<(f64, f64, f64)> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let nf = usize_to_f64(n);
    let x_mean = xs[..n].iter().sum::<f64>() / nf;
    let y_mean = ys[..n].iter().sum::<f64>() / nf;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx <= 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let r = if syy > 0.0 {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    Some((slope, intercept, r))
}

/// QQ scatter and reference line for one series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QqSeries {
    /// Which data the points belong to.
    pub series: Series,
    /// `[theoretical quantile, sorted log value]` pairs.
    pub points: Vec<[f64; 2]>,
    /// Slope of the least-squares reference line.
    pub slope: f64,
    /// Intercept of the least-squares reference line.
    pub intercept: f64,
    /// Correlation coefficient of the reference line fit.
    pub r: f64,
}

impl QqSeries {
    /// Builds the series from log values, or `None` below [`MIN_QQ_SAMPLES`].
    #[must_use]
    pub fn build(series: Series, log_values: &[f64]) -> Option<Self> {
        if log_values.len() < MIN_QQ_SAMPLES {
            return None;
        }
        let mut sorted = log_values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let quantiles = theoretical_quantiles(sorted.len());
        let (slope, intercept, r) = least_squares(&quantiles, &sorted)?;
        Some(Self {
            series,
            points: quantiles.into_iter().zip(sorted).map(|(q, v)| [q, v]).collect(),
            slope,
            intercept,
            r,
        })
    }

    /// End points of the reference line across the series' quantile range.
    #[must_use]
    pub fn reference_line(&self) -> [[f64; 2]; 2] {
        let x0 = self.points.first().map_or(0.0, |p| p[0]);
        let x1 = self.points.last().map_or(0.0, |p| p[0]);
        [
            [x0, self.slope * x0 + self.intercept],
            [x1, self.slope * x1 + self.intercept],
        ]
    }
}

/// Everything needed to draw the QQ plot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QqPlot {
    /// Drawn series: groups with enough samples, then the combined set.
    pub series: Vec<QqSeries>,
    /// Border positions as standard-normal quantiles; `None` when infinite.
    pub borders: [Option<f64>; 2],
}

impl QqPlot {
    /// Plot title.
    pub const TITLE: &'static str = "QQ Plot (Log-Transformed Data)";

    /// Builds the QQ series for every group and the combined set.
    #[must_use]
    pub fn build(pool: &Pool, groups: &Groups) -> Self {
        let mut series = Vec::with_capacity(4);
        for (id, _) in groups.iter() {
            match QqSeries::build(Series::Group(id), &groups.log_values(id)) {
                Some(s) => series.push(s),
                None => debug!("{id}: no QQ series ({} samples)", groups.len(id)),
            }
        }
        if let Some(s) = QqSeries::build(Series::Combined, &pool.log_combined()) {
            series.push(s);
        }

        let (b1, b2) = groups.borders();
        Self {
            series,
            borders: [
                Self::border_quantile(pool, b1),
                Self::border_quantile(pool, b2),
            ],
        }
    }

    /// Standard-normal quantile of a border's empirical rank in the pooled log data.
    ///
    /// Returns `None` when the rank is 0 or 1 (infinite quantile).
    #[must_use]
    pub fn border_quantile(pool: &Pool, border: f64) -> Option<f64> {
        let q = std_normal_ppf(pool.log_rank_fraction(border));
        q.is_finite().then_some(q)
    }

    /// Series for `series`, if it was drawn.
    pub fn series_for(&self, series: Series) -> Option<&QqSeries> {
        self.series.iter().find(|s| s.series == series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::GroupId;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_std_normal_ppf() {
        assert_abs_diff_eq!(std_normal_ppf(0.5), 0.0, epsilon = 1e-12);
        assert_relative_eq!(std_normal_ppf(0.975), 1.959_963_984_540_054, epsilon = 1e-9);
        assert_relative_eq!(std_normal_ppf(0.025), -1.959_963_984_540_054, epsilon = 1e-9);
        assert_eq!(std_normal_ppf(0.0), f64::NEG_INFINITY);
        assert_eq!(std_normal_ppf(1.0), f64::INFINITY);
        assert!(std_normal_ppf(1.5).is_nan());
    }

    #[test]
    fn test_order_statistic_medians() {
        let m = order_statistic_medians(5);
        let last = 0.5f64.powf(0.2);
        assert_relative_eq!(m[0], 1.0 - last);
        assert_relative_eq!(m[2], (3.0 - 0.3175) / 5.365);
        assert_relative_eq!(m[4], last);
        assert!(m.windows(2).all(|w| w[0] < w[1]));

        let two = order_statistic_medians(2);
        assert_relative_eq!(two[0] + two[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quantiles_symmetric() {
        let q = theoretical_quantiles(7);
        for i in 0..7 {
            assert_relative_eq!(q[i], -q[6 - i], epsilon = 1e-6);
        }
        assert_abs_diff_eq!(q[3], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_least_squares_exact_line() {
        let xs = [-1.0, 0.0, 1.0, 2.0];
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 0.5).collect();
        let (slope, intercept, r) = least_squares(&xs, &ys).unwrap();
        assert_relative_eq!(slope, 3.0, epsilon = 1e-12);
        assert_relative_eq!(intercept, 0.5, epsilon = 1e-12);
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);
        assert!(least_squares(&[1.0], &[1.0]).is_none());
        assert!(least_squares(&[1.0, 1.0], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_series_thresholds() {
        assert!(QqSeries::build(Series::Combined, &[]).is_none());
        assert!(QqSeries::build(Series::Combined, &[0.3]).is_none());
        let s = QqSeries::build(Series::Combined, &[0.7, 0.1]).unwrap();
        assert_eq!(s.points.len(), 2);
        assert_relative_eq!(s.points[0][1], 0.1);
        assert_relative_eq!(s.points[1][1], 0.7);
        assert!(s.points[0][0] < 0.0 && s.points[1][0] > 0.0);
    }

    #[test]
    fn test_reference_line_passes_through_fit() {
        let s = QqSeries::build(Series::Combined, &[0.1, 0.4, 0.2, 0.9]).unwrap();
        let [a, b] = s.reference_line();
        assert_relative_eq!(a[1], s.slope * a[0] + s.intercept);
        assert_relative_eq!(b[1], s.slope * b[0] + s.intercept);
        assert!(a[0] < b[0]);
    }

    #[test]
    fn test_border_quantiles() {
        let pool = Pool::new([vec![1.0, 2.0], vec![3.0, 4.0], vec![]]).unwrap();
        // Rank 2 of 4 -> p = 0.5 -> quantile 0.
        assert_abs_diff_eq!(
            QqPlot::border_quantile(&pool, 2.5).unwrap(),
            0.0,
            epsilon = 1e-12
        );
        // At or below the minimum the rank is 0: infinite quantile.
        assert!(QqPlot::border_quantile(&pool, 1.0).is_none());
    }

    #[test]
    fn test_plot_omits_small_groups() {
        let pool = Pool::new([vec![1.0, 1.5], vec![3.0], vec![6.0, 7.0, 8.0]]).unwrap();
        let groups = Groups::partition(pool.combined(), 2.0, 5.0);
        let plot = QqPlot::build(&pool, &groups);
        assert!(plot.series_for(Series::Group(GroupId::One)).is_some());
        assert!(plot.series_for(Series::Group(GroupId::Two)).is_none());
        assert!(plot.series_for(Series::Group(GroupId::Three)).is_some());
        assert_eq!(plot.series_for(Series::Combined).unwrap().points.len(), 6);
        assert!(plot.borders.iter().all(Option::is_some));
    }
}
