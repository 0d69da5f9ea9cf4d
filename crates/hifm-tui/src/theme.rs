//! Color palette and style constants for the hifm TUI.

use ratatui::style::{Color, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 16, 22);
pub const C_ACCENT: Color = Color::Rgb(217, 70, 239); // fuchsia brand
pub const C_ACCENT_SOFT: Color = Color::Rgb(167, 139, 250); // violet
pub const C_SPEAKING: Color = Color::Rgb(80, 200, 120);
pub const C_LIKED: Color = Color::Rgb(255, 105, 140);
pub const C_MUTED: Color = Color::Rgb(78, 72, 92);
pub const C_SECONDARY: Color = Color::Rgb(128, 120, 145);
pub const C_PRIMARY: Color = Color::Rgb(215, 210, 228);
pub const C_SELECTION_BG: Color = Color::Rgb(34, 28, 46);
pub const C_PANEL_BORDER: Color = Color::Rgb(44, 40, 56);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(192, 90, 230);
pub const C_NUMBER_HINT: Color = Color::Rgb(96, 88, 120);
pub const C_FILTER_BG: Color = Color::Rgb(24, 20, 34);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_CHIP: Color = Color::Rgb(240, 171, 252);
pub const C_BADGE: Color = Color::Rgb(160, 155, 175);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(128, 120, 145);
pub const C_MODE_FILTER: Color = Color::Rgb(255, 200, 80);
pub const C_MODE_EDIT: Color = Color::Rgb(217, 70, 239);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
