//! Statistics panel rendering.

use eframe::egui;
use lognorm_core::{GroupId, GroupStatistics, Series};

use super::theme::{stat_label, stat_value, stat_value_highlight, Palette};
use crate::app::LognormApp;
use crate::util::format_stat;

impl LognormApp {
    /// Render a single stat row with label on left and value on right.
    fn stat_row(ui: &mut egui::Ui, label: &str, value: &str, highlight: bool) {
        ui.horizontal(|ui| {
            ui.label(stat_label(label));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if highlight {
                    ui.label(stat_value_highlight(value));
                } else {
                    ui.label(stat_value(value));
                }
            });
        });
    }

    /// Render the three group columns.
    pub(crate) fn render_statistics(&self, ui: &mut egui::Ui) {
        let Some(analysis) = &self.analysis else {
            return;
        };

        ui.columns(3, |columns| {
            for (ui, id) in columns.iter_mut().zip(GroupId::ALL) {
                Self::render_group_statistics(ui, id, analysis.statistics(id));
            }
        });
    }

    fn render_group_statistics(ui: &mut egui::Ui, id: GroupId, stats: Option<&GroupStatistics>) {
        let colors = Palette::from_ui(ui);
        ui.label(
            egui::RichText::new(id.label())
                .size(12.0)
                .strong()
                .color(colors.series(Series::Group(id))),
        );

        let Some(stats) = stats else {
            ui.label(
                egui::RichText::new("No data")
                    .size(11.0)
                    .italics()
                    .color(colors.text_dim),
            );
            return;
        };

        Self::stat_row(ui, "Count", &stats.count.to_string(), true);
        Self::stat_row(ui, "Mean (log)", &format_stat(stats.log_mean), false);
        Self::stat_row(ui, "Std (log)", &format_stat(stats.log_std), false);
        Self::stat_row(ui, "Mean (original)", &format_stat(stats.mean), false);
        Self::stat_row(ui, "Std (original)", &format_stat(stats.std), false);
    }
}
