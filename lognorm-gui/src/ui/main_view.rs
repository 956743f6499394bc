//! Main view (central panel) rendering.

use eframe::egui;

use super::theme::{accent, Palette};
use crate::app::LognormApp;

/// Window title shown above the statistics.
const TITLE: &str = "Log-Normal Population Analyzer (PDF Mode)";

impl LognormApp {
    /// Render the central panel: statistics columns above the two plots.
    pub(crate) fn render_central_panel(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let colors = Palette::from_ui(ui);
            ui.heading(TITLE);
            ui.add_space(8.0);

            if let Some(err) = &self.last_error {
                ui.colored_label(accent::RED, format!("Error: {err}"));
            }

            let Some(analysis) = &self.analysis else {
                ui.centered_and_justified(|ui| ui.label("No Data"));
                return;
            };

            ui.label(
                egui::RichText::new("Group Statistics (log and original scales)")
                    .size(12.0)
                    .color(colors.text_muted),
            );
            ui.add_space(4.0);
            self.render_statistics(ui);
            ui.add_space(12.0);
            ui.separator();

            ui.columns(2, |columns| {
                let height = (columns[0].available_height() - 24.0).max(200.0);
                Self::render_pdf_plot(analysis.pdf(), &mut columns[0], height);
                Self::render_qq_plot(analysis.qq(), &mut columns[1], height);
            });
        });
    }
}
