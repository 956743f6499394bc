//! UI rendering modules.
//!
//! - `control_panel`: Left sidebar with view, population and border controls
//! - `main_view`: Central panel with statistics and plots
//! - `plots`: PDF and QQ plots
//! - `statistics`: Per-group statistics columns

mod control_panel;
mod main_view;
mod plots;
mod statistics;
pub mod theme;
