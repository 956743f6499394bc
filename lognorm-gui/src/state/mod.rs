//! Application state modules.

mod controls;
mod ui;

pub use controls::PopulationControls;
pub use ui::UiState;
