use ratatui::style::Color;

use crate::model::{Priority, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub error: Color,
    pub checked: Color,
    pub selection_bg: Color,
    pub priority_low: Color,
    pub priority_medium: Color,
    pub priority_high: Color,
    pub tag: Color,
    pub due: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x14, 0x16, 0x1E),
            text: Color::Rgb(0xC8, 0xCC, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x5A, 0xA9, 0xE6),
            dim: Color::Rgb(0x6B, 0x71, 0x85),
            error: Color::Rgb(0xF2, 0x5F, 0x5C),
            checked: Color::Rgb(0x70, 0xC1, 0x7A),
            selection_bg: Color::Rgb(0x26, 0x3B, 0x57),
            priority_low: Color::Rgb(0x8F, 0xB3, 0x9A),
            priority_medium: Color::Rgb(0xF2, 0xC1, 0x4E),
            priority_high: Color::Rgb(0xF2, 0x5F, 0x5C),
            tag: Color::Rgb(0xB3, 0x88, 0xEB),
            due: Color::Rgb(0x4E, 0xC5, 0xD4),
        }
    }
}

/// Parse a hex color string like "#F25F5C" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "error" => theme.error = color,
                "checked" => theme.checked = color,
                "selection_bg" => theme.selection_bg = color,
                "priority_low" => theme.priority_low = color,
                "priority_medium" => theme.priority_medium = color,
                "priority_high" => theme.priority_high = color,
                "tag" => theme.tag = color,
                "due" => theme.due = color,
                _ => tracing::warn!(key = %key, "unknown theme color"),
            }
        }

        theme
    }

    /// Color for a priority marker
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.priority_low,
            Priority::Medium => self.priority_medium,
            Priority::High => self.priority_high,
        }
    }
}
