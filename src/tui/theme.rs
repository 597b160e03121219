use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::config::ColorOverrides;
use crate::model::theme::ResolvedTheme;

/// Color palette for the TUI, one per resolved theme
#[derive(Debug, Clone)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub green: Color,
    pub red: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Palette {
            background: Color::Rgb(0x10, 0x10, 0x18),
            text: Color::Rgb(0xC8, 0xC8, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x5B, 0x8D, 0xEF),
            dim: Color::Rgb(0x70, 0x70, 0x88),
            green: Color::Rgb(0x44, 0xCC, 0x77),
            red: Color::Rgb(0xE0, 0x50, 0x50),
            selection_bg: Color::Rgb(0x2A, 0x2A, 0x3E),
            search_match_bg: Color::Rgb(0xE8, 0xC5, 0x4A),
            search_match_fg: Color::Rgb(0x10, 0x10, 0x18),
        }
    }

    pub fn light() -> Self {
        Palette {
            background: Color::Rgb(0xFA, 0xFA, 0xF5),
            text: Color::Rgb(0x30, 0x30, 0x38),
            text_bright: Color::Rgb(0x00, 0x00, 0x00),
            highlight: Color::Rgb(0x3B, 0x59, 0x98),
            dim: Color::Rgb(0x90, 0x90, 0x98),
            green: Color::Rgb(0x20, 0x80, 0x40),
            red: Color::Rgb(0xB0, 0x30, 0x30),
            selection_bg: Color::Rgb(0xE4, 0xE4, 0xEE),
            search_match_bg: Color::Rgb(0x3B, 0x59, 0x98),
            search_match_fg: Color::Rgb(0xFA, 0xFA, 0xF5),
        }
    }

    /// Build the palette for a resolved theme, applying any hex overrides
    /// from config.toml.
    pub fn for_theme(theme: ResolvedTheme, overrides: &ColorOverrides) -> Self {
        let (mut palette, colors) = match theme {
            ResolvedTheme::Dark => (Palette::dark(), &overrides.dark),
            ResolvedTheme::Light => (Palette::light(), &overrides.light),
        };
        palette.apply_overrides(colors);
        palette
    }

    fn apply_overrides(&mut self, colors: &HashMap<String, String>) {
        for (key, value) in colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => self.background = color,
                    "text" => self.text = color,
                    "text_bright" => self.text_bright = color,
                    "highlight" => self.highlight = color,
                    "dim" => self.dim = color,
                    "green" => self.green = color,
                    "red" => self.red = color,
                    "selection_bg" => self.selection_bg = color,
                    "search_match_bg" => self.search_match_bg = color,
                    "search_match_fg" => self.search_match_fg = color,
                    _ => {}
                }
            }
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
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
