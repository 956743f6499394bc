//! Application theme and color definitions.
//!
//! Light and dark palettes with monospace fonts, following system preference,
//! plus the fixed series colors shared by both plots.

use eframe::egui::{self, Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};
use lognorm_core::{GroupId, Series};

/// Base colors of one theme.
#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color32,
    pub bg_panel: Color32,
    pub bg_header: Color32,
    pub bg_input: Color32,
    pub border: Color32,
    pub border_light: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_dim: Color32,
    pub button_hover: Color32,
}

impl Palette {
    pub const DARK: Self = Self {
        bg_dark: Color32::from_rgb(0x1a, 0x1a, 0x1a),
        bg_panel: Color32::from_rgb(0x1f, 0x1f, 0x1f),
        bg_header: Color32::from_rgb(0x25, 0x25, 0x25),
        bg_input: Color32::from_rgb(0x2a, 0x2a, 0x2a),
        border: Color32::from_rgb(0x33, 0x33, 0x33),
        border_light: Color32::from_rgb(0x44, 0x44, 0x44),
        text_primary: Color32::from_rgb(0xe0, 0xe0, 0xe0),
        text_muted: Color32::from_rgb(0x88, 0x88, 0x88),
        text_dim: Color32::from_rgb(0x66, 0x66, 0x66),
        button_hover: Color32::from_rgb(0x3a, 0x3a, 0x3a),
    };

    pub const LIGHT: Self = Self {
        bg_dark: Color32::from_rgb(0xf5, 0xf5, 0xf5),
        bg_panel: Color32::from_rgb(0xff, 0xff, 0xff),
        bg_header: Color32::from_rgb(0xfa, 0xfa, 0xfa),
        bg_input: Color32::from_rgb(0xf0, 0xf0, 0xf0),
        border: Color32::from_rgb(0xd0, 0xd0, 0xd0),
        border_light: Color32::from_rgb(0xc0, 0xc0, 0xc0),
        text_primary: Color32::from_rgb(0x1a, 0x1a, 0x1a),
        text_muted: Color32::from_rgb(0x66, 0x66, 0x66),
        text_dim: Color32::from_rgb(0x88, 0x88, 0x88),
        button_hover: Color32::from_rgb(0xdd, 0xdd, 0xdd),
    };

    /// Palette for the current theme of `ctx`.
    pub fn from_ctx(ctx: &egui::Context) -> Self {
        Self::from_dark_mode(ctx.style().visuals.dark_mode)
    }

    /// Palette for the current theme of `ui`.
    pub fn from_ui(ui: &egui::Ui) -> Self {
        Self::from_dark_mode(ui.visuals().dark_mode)
    }

    pub fn from_dark_mode(is_dark: bool) -> Self {
        if is_dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    /// Plot color of a series. The combined series uses the neutral text color.
    pub fn series(&self, s: Series) -> Color32 {
        match s {
            Series::Group(GroupId::One) => series::GROUP1,
            Series::Group(GroupId::Two) => series::GROUP2,
            Series::Group(GroupId::Three) => series::GROUP3,
            Series::Combined => self.text_primary,
        }
    }
}

/// Shared accent colors (same for both themes).
pub mod accent {
    use eframe::egui::Color32;

    pub const BLUE: Color32 = Color32::from_rgb(0x4a, 0x9e, 0xff);
    pub const GREEN: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
    pub const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
}

/// Fixed group colors.
pub mod series {
    use eframe::egui::Color32;

    pub const GROUP1: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
    pub const GROUP2: Color32 = Color32::from_rgb(0xff, 0x7f, 0x0e);
    pub const GROUP3: Color32 = Color32::from_rgb(0x2c, 0xa0, 0x2c);
}

/// Configure style based on current visuals (dark/light mode).
pub fn configure_style(ctx: &egui::Context) {
    let is_dark = ctx.style().visuals.dark_mode;
    ctx.set_visuals(build_visuals(is_dark));
    configure_fonts_and_spacing(ctx);
}

fn build_visuals(is_dark: bool) -> Visuals {
    let p = Palette::from_dark_mode(is_dark);
    let mut visuals = if is_dark {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    visuals.window_fill = p.bg_panel;
    visuals.panel_fill = p.bg_panel;
    visuals.faint_bg_color = p.bg_dark;
    visuals.extreme_bg_color = p.bg_input;

    let rounding = Rounding::same(4.0);
    let widgets = &mut visuals.widgets;
    for (w, fill, fg, stroke) in [
        (&mut widgets.noninteractive, p.bg_input, p.text_muted, p.border),
        (&mut widgets.inactive, p.bg_input, p.text_primary, p.border_light),
        (&mut widgets.hovered, p.button_hover, p.text_primary, accent::BLUE),
        (&mut widgets.active, accent::BLUE, Color32::WHITE, accent::BLUE),
    ] {
        w.bg_fill = fill;
        w.fg_stroke = Stroke::new(1.0, fg);
        w.bg_stroke = Stroke::new(1.0, stroke);
        w.rounding = rounding;
    }

    let selection_alpha = if is_dark { 0.3 } else { 0.2 };
    visuals.selection.bg_fill = accent::BLUE.gamma_multiply(selection_alpha);
    visuals.selection.stroke = Stroke::new(1.0, accent::BLUE);

    visuals
}

/// Configure fonts and spacing (theme-independent).
fn configure_fonts_and_spacing(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    // Monospace everywhere
    style.text_styles = [
        (TextStyle::Small, FontId::new(10.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Heading, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.slider_width = 150.0;

    ctx.set_style(style);
}

/// Style a button as the primary action button.
pub fn primary_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(Color32::WHITE))
        .fill(accent::GREEN)
        .rounding(Rounding::same(4.0))
}

/// Create a form label.
pub fn form_label(text: &str) -> egui::RichText {
    egui::RichText::new(text.to_uppercase()).size(10.0)
}

/// Create a stat label (left column).
pub fn stat_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0).weak()
}

/// Create a stat value (right column).
pub fn stat_value(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0)
}

/// Create a highlighted stat value (e.g., group count).
pub fn stat_value_highlight(text: &str) -> egui::RichText {
    egui::RichText::new(text)
        .size(11.0)
        .color(accent::GREEN)
        .strong()
}

static LAST_DARK_MODE: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);
static THEME_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Re-apply styles when the system switches between light and dark.
/// Call this in the update loop.
pub fn apply_system_theme(ctx: &egui::Context) {
    use std::sync::atomic::Ordering;

    let is_dark = ctx.style().visuals.dark_mode;
    let was_initialized = THEME_INITIALIZED.swap(true, Ordering::Relaxed);
    let last_dark = LAST_DARK_MODE.swap(is_dark, Ordering::Relaxed);

    if !was_initialized || last_dark != is_dark {
        configure_style(ctx);
    }
}
