//! Per-group summary statistics.

use std::fmt;

use crate::util::usize_to_f64;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Population mean and standard deviation (divisor `n`).
///
/// Returns `None` for empty input.
#[must_use]
pub fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = usize_to_f64(values.len());
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, var.sqrt()))
}

/// Count and log/original-scale moments of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupStatistics {
    /// Number of values.
    pub count: usize,
    /// Mean of `ln(x)`.
    pub log_mean: f64,
    /// Population standard deviation of `ln(x)`.
    pub log_std: f64,
    /// Mean of `x`.
    pub mean: f64,
    /// Population standard deviation of `x`.
    pub std: f64,
}

impl GroupStatistics {
    /// Computes statistics for a group's raw values.
    ///
    /// Returns `None` for an empty group, which is displayed as "no data".
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (mean, std) = mean_std(values)?;
        let logs: Vec<f64> = values.iter().map(|v| v.ln()).collect();
        let (log_mean, log_std) = mean_std(&logs)?;
        Some(Self {
            count: values.len(),
            log_mean,
            log_std,
            mean,
            std,
        })
    }
}

impl fmt::Display for GroupStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Count: {}", self.count)?;
        writeln!(
            f,
            "Mean (log): {:.4} | Std (log): {:.4}",
            self.log_mean, self.log_std
        )?;
        write!(
            f,
            "Mean (original): {:.4} | Std (original): {:.4}",
            self.mean, self.std
        )
    }
}
