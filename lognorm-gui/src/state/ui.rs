//! UI state for panel visibility and view options.

/// Sidebar toggles.
pub struct UiState {
    /// Show log-normal densities on a logarithmic x axis; off shows normal
    /// densities of the log-transformed data.
    pub log_scale: bool,
    /// Show the population parameter sliders; defaults are used when hidden.
    pub show_population_controls: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            log_scale: true,
            show_population_controls: false,
        }
    }
}
