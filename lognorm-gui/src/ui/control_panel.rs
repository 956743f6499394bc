//! Control panel (left sidebar) rendering.

use eframe::egui::{self, Color32, FontFamily, FontId, Stroke};
use lognorm_core::{BorderOrder, ParamRange};

use super::theme::{accent, form_label, primary_button, Palette};
use crate::app::LognormApp;
use crate::util::{f64_range, usize_range};

impl LognormApp {
    /// Render the left control panel.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        let colors = Palette::from_ctx(ctx);

        egui::SidePanel::left("ctrl")
            .default_width(280.0)
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_panel)
                    .inner_margin(egui::Margin::ZERO),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_section(ui, "View", true, |app, ui| {
                            app.render_view_options(ui);
                        });

                        if self.ui_state.show_population_controls {
                            self.render_section(ui, "Populations", true, |app, ui| {
                                app.render_population_controls(ui);
                            });
                        }

                        self.render_section(ui, "Borders", true, |app, ui| {
                            app.render_border_controls(ui);
                        });

                        ui.add_space(12.0);
                    });
            });
    }

    /// Render a collapsible section with header.
    fn render_section<F>(&mut self, ui: &mut egui::Ui, title: &str, default_open: bool, content: F)
    where
        F: FnOnce(&mut Self, &mut egui::Ui),
    {
        ui.push_id(title, |ui| {
            let colors = Palette::from_ui(ui);
            let header_height = ui.spacing().interact_size.y.max(28.0);
            let (header_rect, header_response) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), header_height),
                egui::Sense::click(),
            );

            let id = ui.make_persistent_id(format!("{title}_open"));
            let mut is_open = ui.data_mut(|d| *d.get_temp_mut_or_insert_with(id, || default_open));
            if header_response.clicked() {
                is_open = !is_open;
                ui.data_mut(|d| d.insert_temp(id, is_open));
            }

            let header_fill = if header_response.hovered() {
                colors.bg_header
            } else {
                Color32::TRANSPARENT
            };
            ui.painter().rect_filled(header_rect, 0.0, header_fill);
            ui.painter().text(
                header_rect.left_center() + egui::vec2(16.0, 0.0),
                egui::Align2::LEFT_CENTER,
                title.to_uppercase(),
                FontId::new(11.0, FontFamily::Proportional),
                colors.text_primary,
            );
            ui.painter().text(
                header_rect.right_center() - egui::vec2(16.0, 0.0),
                egui::Align2::CENTER_CENTER,
                if is_open { "▼" } else { "▶" },
                egui::FontId::monospace(10.0),
                colors.text_dim,
            );
            ui.painter().hline(
                header_rect.x_range(),
                header_rect.bottom(),
                Stroke::new(1.0, colors.border),
            );

            if is_open {
                egui::Frame::none()
                    .inner_margin(egui::Margin {
                        left: 16.0,
                        right: 16.0,
                        top: 12.0,
                        bottom: 16.0,
                    })
                    .show(ui, |ui| {
                        content(self, ui);
                    });
            }

            let last_rect = ui.min_rect();
            ui.painter().hline(
                last_rect.x_range(),
                last_rect.bottom(),
                Stroke::new(1.0, colors.border),
            );
        });
    }

    /// Render the display toggles.
    fn render_view_options(&mut self, ui: &mut egui::Ui) {
        if ui
            .checkbox(&mut self.ui_state.log_scale, "View in logarithmic scale")
            .changed()
        {
            self.needs_recompute = true;
        }

        if ui
            .checkbox(
                &mut self.ui_state.show_population_controls,
                "Show population parameter controls",
            )
            .changed()
        {
            self.populations_changed();
        }
    }

    /// Render the sample-size slider and the per-population sliders.
    fn render_population_controls(&mut self, ui: &mut egui::Ui) {
        let colors = Palette::from_ui(ui);
        let mut changed = false;

        ui.label(form_label("Sample size per population"));
        changed |= ui
            .add(
                egui::Slider::new(
                    &mut self.controls.sample_count,
                    usize_range(ParamRange::SAMPLE_COUNT),
                )
                .step_by(ParamRange::SAMPLE_COUNT.step),
            )
            .changed();

        for i in 0..3 {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(format!("Population {}", i + 1))
                    .size(10.0)
                    .color(colors.text_muted),
            );
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut self.controls.log_means[i],
                        f64_range(ParamRange::LOG_MEAN),
                    )
                    .step_by(ParamRange::LOG_MEAN.step)
                    .text("Log mean"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(
                        &mut self.controls.log_stds[i],
                        f64_range(ParamRange::LOG_STD),
                    )
                    .step_by(ParamRange::LOG_STD.step)
                    .text("Log std"),
                )
                .changed();
        }

        if changed {
            self.populations_changed();
        }
    }

    /// Render the two border sliders and the ordering warning.
    fn render_border_controls(&mut self, ui: &mut egui::Ui) {
        let Some(analysis) = &self.analysis else {
            ui.label(egui::RichText::new("No data").color(Palette::from_ui(ui).text_dim));
            return;
        };
        let (min, max) = analysis.pool().value_range();
        let (mut border1, mut border2) = self.borders.unwrap_or_else(|| analysis.borders());

        ui.label(form_label("Border 1"));
        let r1 = ui.add(egui::Slider::new(&mut border1, min..=max).max_decimals(4));
        ui.add_space(4.0);
        ui.label(form_label("Border 2"));
        let r2 = ui.add(egui::Slider::new(&mut border2, min..=max).max_decimals(4));

        if let Some(msg) = BorderOrder::of(border1, border2).warning() {
            ui.add_space(4.0);
            ui.colored_label(accent::RED, msg);
        }

        ui.add_space(8.0);
        let reset = ui
            .add(primary_button("Reset to 30/70 percentiles"))
            .on_hover_text("Place the borders at the 30th and 70th percentiles");

        if reset.clicked() {
            self.reset_borders();
        } else if r1.changed() || r2.changed() {
            self.set_borders(border1, border2);
        }
    }
}
