use crate::types::Rgb;
use ratatui::style::{Color, Modifier, Style};

// ── Overlay palette ─────────────────────────────────────────────
pub const TEXT: Color = Color::Rgb(255, 255, 255);

/// The half-block glyph: fg paints the upper pixel, bg the lower one.
pub const HALF_BLOCK: char = '▀';

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

// ── Composite styles ────────────────────────────────────────────
pub fn title_style() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn clock_style() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}
