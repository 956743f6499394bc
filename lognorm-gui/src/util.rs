//! Numeric conversion and formatting utilities for lognorm-gui.

use std::ops::RangeInclusive;

use lognorm_core::ParamRange;

/// Convert f64 to usize, clamping negatives and NaN to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_usize(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.round() as usize
    } else {
        0
    }
}

/// Slider range of a real-valued parameter.
pub fn f64_range(range: ParamRange) -> RangeInclusive<f64> {
    range.min..=range.max
}

/// Slider range of an integer parameter.
pub fn usize_range(range: ParamRange) -> RangeInclusive<usize> {
    f64_to_usize(range.min)..=f64_to_usize(range.max)
}

/// Tick label for an axis that plots `log10(x)`: shows `x` itself.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(log10_tick_label(0.0), "1");
/// assert_eq!(log10_tick_label(-1.0), "0.1");
/// assert_eq!(log10_tick_label(1.5), "31.62");
/// ```
#[must_use]
pub fn log10_tick_label(exponent: f64) -> String {
    let value = 10f64.powf(exponent);
    if !value.is_finite() {
        return String::new();
    }
    let text = if value >= 100.0 {
        format!("{value:.0}")
    } else if value >= 0.01 {
        format!("{value:.2}")
    } else {
        format!("{value:.1e}")
    };
    trim_zeros(&text)
}

fn trim_zeros(text: &str) -> String {
    if text.contains('e') || !text.contains('.') {
        return text.to_string();
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format a value with four decimals, as the statistics panel does.
#[must_use]
pub fn format_stat(value: f64) -> String {
    format!("{value:.4}")
}
