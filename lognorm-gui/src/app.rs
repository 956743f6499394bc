//! Main application state and logic.
//!
//! Contains the `LognormApp` struct which holds the control values and the
//! analysis of the current frame. Any control change triggers a full
//! recomputation from a freshly seeded generator.

use eframe::egui;
use log::{debug, error};

use crate::state::{PopulationControls, UiState};
use crate::ui::theme;
use lognorm_core::{Analysis, AnalyzerConfig, PopulationParams, ScaleMode};

/// Main application state.
pub struct LognormApp {
    /// UI display state.
    pub(crate) ui_state: UiState,
    /// Population slider values.
    pub(crate) controls: PopulationControls,
    /// Border slider values; `None` until the percentile defaults are known.
    pub(crate) borders: Option<(f64, f64)>,
    /// Seed applied at the start of every run.
    pub(crate) seed: u64,

    /// Result of the latest run.
    pub(crate) analysis: Option<Analysis>,
    /// Error of the latest run, if it failed.
    pub(crate) last_error: Option<String>,
    /// Set by controls; consumed by `update`.
    pub(crate) needs_recompute: bool,
}

impl Default for LognormApp {
    fn default() -> Self {
        let mut app = Self {
            ui_state: UiState::default(),
            controls: PopulationControls::default(),
            borders: None,
            seed: AnalyzerConfig::default().seed,
            analysis: None,
            last_error: None,
            needs_recompute: true,
        };
        app.recompute();
        app
    }
}

impl LognormApp {
    /// Populations in effect: slider values when shown, defaults otherwise.
    pub fn populations(&self) -> [PopulationParams; 3] {
        if self.ui_state.show_population_controls {
            self.controls.populations()
        } else {
            PopulationParams::defaults()
        }
    }

    /// Configuration for the next run.
    pub fn config(&self) -> AnalyzerConfig {
        let scale = if self.ui_state.log_scale {
            ScaleMode::Original
        } else {
            ScaleMode::Log
        };
        AnalyzerConfig {
            populations: self.populations(),
            seed: self.seed,
            borders: self.borders,
            scale,
        }
    }

    /// Mark the populations as changed: the border sliders return to the
    /// percentile defaults of the new data.
    pub fn populations_changed(&mut self) {
        self.reset_borders();
    }

    /// Return the borders to the 30th/70th percentile defaults.
    pub fn reset_borders(&mut self) {
        self.borders = None;
        self.needs_recompute = true;
    }

    /// Store new border slider values.
    pub fn set_borders(&mut self, border1: f64, border2: f64) {
        self.borders = Some((border1, border2));
        self.needs_recompute = true;
    }

    /// Run the full pipeline for the current controls.
    pub fn recompute(&mut self) {
        self.needs_recompute = false;
        let config = self.config();
        debug!("recomputing: {config:?}");

        match Analysis::compute(&config) {
            Ok(analysis) => {
                self.borders = Some(analysis.borders());
                self.analysis = Some(analysis);
                self.last_error = None;
            }
            Err(e) => {
                error!("analysis failed: {e}");
                self.analysis = None;
                self.last_error = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for LognormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        theme::apply_system_theme(ctx);
        self.render_side_panel(ctx);
        if self.needs_recompute {
            self.recompute();
        }
        self.render_central_panel(ctx);
    }
}
