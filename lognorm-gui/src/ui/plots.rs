//! PDF and QQ plot rendering.

use std::ops::RangeInclusive;

use eframe::egui;
use egui_plot::{GridMark, Legend, Line, LineStyle, Plot, PlotPoints, Points, VLine};
use lognorm_core::{PdfPlot, QqPlot, ScaleMode, Series};

use super::theme::Palette;
use crate::app::LognormApp;
use crate::util::log10_tick_label;

const DASHED: LineStyle = LineStyle::Dashed { length: 8.0 };

/// Alpha of QQ scatter points.
const QQ_POINT_ALPHA: f32 = 0.6;
/// Alpha of QQ reference lines.
const QQ_LINE_ALPHA: f32 = 0.8;

/// Maps a PDF x coordinate into plot space.
///
/// The original-scale view plots `log10(x)` and relabels the ticks, which
/// gives a logarithmic x axis.
fn pdf_x(scale: ScaleMode, x: f64) -> f64 {
    match scale {
        ScaleMode::Original => x.log10(),
        ScaleMode::Log => x,
    }
}

fn border_line(x: f64, colors: Palette) -> VLine {
    VLine::new(x).color(colors.text_muted).width(1.0).style(DASHED)
}

impl LognormApp {
    /// Render the PDF plot.
    pub(crate) fn render_pdf_plot(pdf: &PdfPlot, ui: &mut egui::Ui, height: f32) {
        let colors = Palette::from_ui(ui);
        let scale = pdf.scale;
        ui.label(egui::RichText::new(pdf.title()).strong());

        let mut plot = Plot::new("pdf_plot")
            .legend(Legend::default())
            .x_axis_label(pdf.x_label())
            .y_axis_label("Density")
            .include_y(0.0)
            .height(height);
        if scale == ScaleMode::Original {
            plot = plot.x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
                log10_tick_label(mark.value)
            });
        }

        plot.show(ui, |plot_ui| {
            for curve in &pdf.curves {
                let points: Vec<[f64; 2]> = curve
                    .points
                    .iter()
                    .map(|&[x, y]| [pdf_x(scale, x), y])
                    .filter(|p| p[0].is_finite() && p[1].is_finite())
                    .collect();
                let mut line = Line::new(PlotPoints::from(points))
                    .color(colors.series(curve.series))
                    .name(curve.series.label());
                line = match curve.series {
                    Series::Combined => line.width(1.5).style(DASHED),
                    Series::Group(_) => line.width(2.0),
                };
                plot_ui.line(line);
            }

            for &border in &pdf.borders {
                let x = pdf_x(scale, border);
                if x.is_finite() {
                    plot_ui.vline(border_line(x, colors));
                }
            }
        });
    }

    /// Render the QQ plot.
    pub(crate) fn render_qq_plot(qq: &QqPlot, ui: &mut egui::Ui, height: f32) {
        let colors = Palette::from_ui(ui);
        ui.label(egui::RichText::new(QqPlot::TITLE).strong());

        Plot::new("qq_plot")
            .legend(Legend::default())
            .x_axis_label("Theoretical quantiles")
            .y_axis_label("Ordered values")
            .height(height)
            .show(ui, |plot_ui| {
                for s in &qq.series {
                    let color = colors.series(s.series);
                    plot_ui.points(
                        Points::new(PlotPoints::from(s.points.clone()))
                            .color(color.gamma_multiply(QQ_POINT_ALPHA))
                            .radius(2.0)
                            .name(format!("{} (r = {:.3})", s.series.label(), s.r)),
                    );
                    plot_ui.line(
                        Line::new(PlotPoints::from(s.reference_line().to_vec()))
                            .color(color.gamma_multiply(QQ_LINE_ALPHA))
                            .width(1.5)
                            .style(DASHED),
                    );
                }

                for q in qq.borders.iter().flatten() {
                    plot_ui.vline(border_line(*q, colors));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_x_mapping() {
        assert!((pdf_x(ScaleMode::Original, 100.0) - 2.0).abs() < 1e-12);
        assert!((pdf_x(ScaleMode::Log, -0.5) + 0.5).abs() < f64::EPSILON);
        assert!(!pdf_x(ScaleMode::Original, 0.0).is_finite());
    }
}
