//! Plain-text rendering of an analysis.

use std::fmt::{self, Write};

use lognorm_core::{Analysis, FitResult, GroupId, Series};

/// Renders the statistics panel, fits and QQ summary.
pub fn render(analysis: &Analysis) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, analysis)?;
    Ok(out)
}

fn write_report(out: &mut String, analysis: &Analysis) -> fmt::Result {
    let pool = analysis.pool();
    let (b1, b2) = analysis.borders();

    writeln!(out, "Combined: {} samples", pool.len())?;
    for (i, population) in pool.populations().iter().enumerate() {
        writeln!(out, "  Population {}: {} samples", i + 1, population.len())?;
    }
    writeln!(out, "Range: {:.4} - {:.4}", pool.min(), pool.max())?;
    writeln!(out, "Border 1: {:.4}", b1)?;
    writeln!(out, "Border 2: {:.4}", b2)?;
    if let Some(msg) = analysis.border_order().warning() {
        writeln!(out, "Warning: {msg}")?;
    }

    writeln!(out)?;
    writeln!(out, "Group Statistics (log and original scales)")?;
    for id in GroupId::ALL {
        match analysis.statistics(id) {
            Some(stats) => {
                writeln!(out, "{id}")?;
                for line in stats.to_string().lines() {
                    writeln!(out, "  {line}")?;
                }
            }
            None => writeln!(out, "{id}: No data")?,
        }
    }

    let pdf = analysis.pdf();
    writeln!(out)?;
    writeln!(out, "{}", pdf.title())?;
    for series in all_series() {
        match pdf.curve_for(series) {
            Some(curve) => writeln!(out, "  {:<9} {}", series, describe_fit(&curve.fit))?,
            None => writeln!(out, "  {:<9} skipped", series)?,
        }
    }

    let qq = analysis.qq();
    writeln!(out)?;
    writeln!(out, "QQ Plot (Log-Transformed Data)")?;
    for series in all_series() {
        match qq.series_for(series) {
            Some(s) => writeln!(
                out,
                "  {:<9} slope {:.4}, intercept {:.4}, r {:.4}",
                series, s.slope, s.intercept, s.r
            )?,
            None => writeln!(out, "  {:<9} skipped", series)?,
        }
    }
    for (i, q) in qq.borders.iter().enumerate() {
        match q {
            Some(q) => writeln!(out, "  Border {} quantile: {:.4}", i + 1, q)?,
            None => writeln!(out, "  Border {} quantile: out of range", i + 1)?,
        }
    }
    Ok(())
}

fn all_series() -> [Series; 4] {
    [
        Series::Group(GroupId::One),
        Series::Group(GroupId::Two),
        Series::Group(GroupId::Three),
        Series::Combined,
    ]
}

fn describe_fit(fit: &FitResult) -> String {
    match fit {
        FitResult::LogNormal(p) => format!(
            "log-normal shape {:.4}, loc {:.1}, scale {:.4}",
            p.shape, p.loc, p.scale
        ),
        FitResult::Normal(p) => format!("normal mean {:.4}, std {:.4}", p.mean, p.std_dev),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lognorm_core::{compute, AnalyzerConfig, ScaleMode};

    #[test]
    fn test_default_report() {
        let analysis = compute(&AnalyzerConfig::new()).unwrap();
        let text = render(&analysis).unwrap();
        assert!(text.starts_with("Combined: 3000 samples\n  Population 1: 1000 samples\n"));
        assert!(text.contains("  Population 3: 1000 samples\n"));
        assert!(text.contains("Group Statistics (log and original scales)"));
        assert!(text.contains("PDFs in Original Scale (Log-Normal)"));
        assert!(!text.contains("No data"));
        assert!(!text.contains("Warning"));
        assert_eq!(text.matches("log-normal shape").count(), 4);
    }

    #[test]
    fn test_inverted_borders_report() {
        let config = AnalyzerConfig::new()
            .with_borders(4.0, 2.0)
            .with_scale(ScaleMode::Log);
        let text = render(&compute(&config).unwrap()).unwrap();
        assert!(text.contains("Warning: Border 1 must be less than Border 2"));
        assert!(text.contains("Group 2: No data"));
        assert!(text.contains("PDFs of Log-Transformed Data"));
        assert_eq!(text.matches("normal mean").count(), 3);
        assert_eq!(text.matches("  Group 2   skipped").count(), 2);
    }
}
