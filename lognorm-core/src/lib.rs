//! lognorm-core: Computational core of the log-normal population analyzer.
//!
//! This crate synthesizes three log-normal populations, pools them,
//! partitions the pooled samples into three value-range groups and fits
//! log-normal/normal models to every group. The renderer-facing PDF and
//! QQ plot data are produced here so any front end can draw them.
//!

pub mod analysis;
pub mod config;
pub mod error;
pub mod fit;
pub mod partition;
pub mod pdf;
pub mod population;
pub mod qq;
pub mod statistics;
mod util;

pub use analysis::{compute, Analysis};
pub use config::{AnalyzerConfig, ParamRange, PopulationParams, ScaleMode};
pub use error::{Error, Result};
pub use fit::{FitResult, LogNormalFit, NormalFit, MIN_FIT_SAMPLES};
pub use partition::{BorderOrder, GroupId, Groups};
pub use pdf::{PdfCurve, PdfPlot, Series};
pub use population::{generate_populations, percentile, Pool};
pub use qq::{QqPlot, QqSeries, MIN_QQ_SAMPLES};
pub use statistics::GroupStatistics;
