//! Fitted density curves for the PDF plot.

use std::fmt;

use log::debug;

use crate::config::ScaleMode;
use crate::fit::FitResult;
use crate::partition::{GroupId, Groups};
use crate::population::Pool;
use crate::util::{linspace, logspace};
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of evaluation points per curve.
pub const GRID_POINTS: usize = 1000;

/// Lower clamp of the original-scale grid.
pub const MIN_GRID_VALUE: f64 = 1e-3;

/// A plotted data series: one group or the combined set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Series {
    /// One of the three groups.
    Group(GroupId),
    /// All pooled samples.
    Combined,
}

impl Series {
    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Group(id) => id.label(),
            Self::Combined => "Combined",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One fitted density curve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PdfCurve {
    /// Which data the curve was fitted to.
    pub series: Series,
    /// Fitted parameters.
    pub fit: FitResult,
    /// `[x, density]` pairs over the evaluation grid.
    pub points: Vec<[f64; 2]>,
}

/// Everything needed to draw the PDF plot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PdfPlot {
    /// View the curves were fitted for.
    pub scale: ScaleMode,
    /// Group curves (only groups large enough) followed by the combined curve.
    pub curves: Vec<PdfCurve>,
    /// Border positions in the plot's x space.
    pub borders: [f64; 2],
}

impl PdfPlot {
    /// Evaluation grid for `scale`.
    ///
    /// Original scale: geometrically spaced over the pooled value range
    /// (lower end clamped to [`MIN_GRID_VALUE`]). Log scale: linearly
    /// spaced over the pooled log-value range.
    #[must_use]
    pub fn grid(pool: &Pool, scale: ScaleMode) -> Vec<f64> {
        match scale {
            ScaleMode::Original => logspace(
                pool.min().max(MIN_GRID_VALUE).log10(),
                pool.max().log10(),
                GRID_POINTS,
            ),
            ScaleMode::Log => linspace(pool.min().ln(), pool.max().ln(), GRID_POINTS),
        }
    }

    /// Fits every group and the combined set and evaluates the curves.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined set cannot be fitted.
    pub fn build(pool: &Pool, groups: &Groups, scale: ScaleMode) -> Result<Self> {
        let xs = Self::grid(pool, scale);
        let mut curves = Vec::with_capacity(4);

        for (id, values) in groups.iter() {
            let Some(fit) = FitResult::fit_group(values, scale) else {
                debug!("{id}: no PDF curve ({} samples)", values.len());
                continue;
            };
            curves.push(Self::curve(Series::Group(id), fit, &xs)?);
        }

        let combined = FitResult::fit(pool.combined(), scale)?;
        curves.push(Self::curve(Series::Combined, combined, &xs)?);

        let (b1, b2) = groups.borders();
        let borders = match scale {
            ScaleMode::Original => [b1, b2],
            ScaleMode::Log => [b1.ln(), b2.ln()],
        };

        Ok(Self {
            scale,
            curves,
            borders,
        })
    }

    fn curve(series: Series, fit: FitResult, xs: &[f64]) -> Result<PdfCurve> {
        let ys = fit.pdf(xs)?;
        Ok(PdfCurve {
            series,
            fit,
            points: xs.iter().zip(ys).map(|(&x, y)| [x, y]).collect(),
        })
    }

    /// Curve for `series`, if it was drawn.
    pub fn curve_for(&self, series: Series) -> Option<&PdfCurve> {
        self.curves.iter().find(|c| c.series == series)
    }

    /// Plot title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.scale {
            ScaleMode::Original => "PDFs in Original Scale (Log-Normal)",
            ScaleMode::Log => "PDFs of Log-Transformed Data",
        }
    }

    /// X axis label.
    #[must_use]
    pub fn x_label(&self) -> &'static str {
        match self.scale {
            ScaleMode::Original => "Value",
            ScaleMode::Log => "Log(Value)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pool() -> Pool {
        Pool::new([
            vec![0.5, 0.8, 1.1, 0.9],
            vec![2.0, 2.5, 3.1],
            vec![7.5, 9.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_grid_spans_range() {
        let pool = pool();
        let xs = PdfPlot::grid(&pool, ScaleMode::Original);
        assert_eq!(xs.len(), GRID_POINTS);
        assert_relative_eq!(xs[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(xs[GRID_POINTS - 1], 9.0, epsilon = 1e-12);
        assert!(xs.windows(2).all(|w| w[1] / w[0] > 1.0));

        let ls = PdfPlot::grid(&pool, ScaleMode::Log);
        assert_relative_eq!(ls[0], 0.5f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(ls[GRID_POINTS - 1], 9.0f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_grid_clamps_small_minimum() {
        let pool = Pool::new([vec![1e-6, 1.0], vec![], vec![10.0]]).unwrap();
        let xs = PdfPlot::grid(&pool, ScaleMode::Original);
        assert_relative_eq!(xs[0], MIN_GRID_VALUE, epsilon = 1e-15);
    }

    #[test]
    fn test_small_groups_are_skipped() {
        let pool = pool();
        let groups = Groups::partition(pool.combined(), 1.5, 5.0);
        let plot = PdfPlot::build(&pool, &groups, ScaleMode::Log).unwrap();

        let series: Vec<Series> = plot.curves.iter().map(|c| c.series).collect();
        assert_eq!(
            series,
            [
                Series::Group(GroupId::One),
                Series::Group(GroupId::Two),
                Series::Combined
            ]
        );
        assert!(plot.curve_for(Series::Group(GroupId::Three)).is_none());
        assert_relative_eq!(plot.borders[0], 1.5f64.ln());
        assert_relative_eq!(plot.borders[1], 5.0f64.ln());
        assert_eq!(plot.x_label(), "Log(Value)");
    }

    #[test]
    fn test_original_scale_borders_untransformed() {
        let pool = pool();
        let groups = Groups::partition(pool.combined(), 1.5, 5.0);
        let plot = PdfPlot::build(&pool, &groups, ScaleMode::Original).unwrap();
        assert_eq!(plot.borders, [1.5, 5.0]);
        assert_eq!(plot.title(), "PDFs in Original Scale (Log-Normal)");
        let combined = plot.curve_for(Series::Combined).unwrap();
        assert_eq!(combined.points.len(), GRID_POINTS);
        assert!(combined.points.iter().all(|p| p[1] >= 0.0));
    }
}
