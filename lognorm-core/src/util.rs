//! Numeric conversion helpers.

/// Convert usize to f64 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// `count` points evenly spaced from `start` to `end`, both inclusive.
pub(crate) fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / usize_to_f64(count - 1);
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * usize_to_f64(i)
                    }
                })
                .collect()
        }
    }
}

/// `count` points geometrically spaced from `10^start_exp` to `10^end_exp`.
pub(crate) fn logspace(start_exp: f64, end_exp: f64, count: usize) -> Vec<f64> {
    linspace(start_exp, end_exp, count)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}
