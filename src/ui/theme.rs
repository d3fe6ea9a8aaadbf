//! Theme system for the Spin Wheel UI.
//!
//! This module provides dark and light palettes. The preset is chosen in the
//! config file and the colors are used consistently throughout the UI.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Dark,
    Light,
}

impl ThemePreset {
    /// Resolves a preset from its config name; unknown names fall back to dark.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => ThemePreset::Light,
            "dark" => ThemePreset::Dark,
            other => {
                tracing::warn!(theme = other, "unknown theme, using dark");
                ThemePreset::Dark
            }
        }
    }
}

/// Complete color theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub preset: ThemePreset,
    pub colors: ThemeColors,
}

/// Individual color definitions for the theme
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Primary accent color (used for highlights, active tab)
    pub primary: String,
    /// Background color
    pub background: String,
    /// Foreground/text color
    pub foreground: String,
    /// Success/positive messages
    pub success: String,
    /// Warning messages
    pub warning: String,
    /// Error messages, destructive actions
    pub error: String,
    /// Border color
    pub border: String,
    /// Muted/disabled text
    pub muted: String,
    /// Key hints in the footer
    pub key: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::dark()
    }
}

impl ThemeColors {
    /// Creates a dark theme color palette
    pub fn dark() -> Self {
        Self {
            primary: "cyan".to_string(),
            background: "#1B1F22".to_string(),
            foreground: "white".to_string(),
            success: "green".to_string(),
            warning: "yellow".to_string(),
            error: "red".to_string(),
            border: "#2D3339".to_string(),
            muted: "darkgray".to_string(),
            key: "yellow".to_string(),
        }
    }

    /// Creates a light theme color palette
    pub fn light() -> Self {
        Self {
            primary: "blue".to_string(),
            background: "#F1F2EE".to_string(),
            foreground: "black".to_string(),
            success: "green".to_string(),
            warning: "magenta".to_string(),
            error: "red".to_string(),
            border: "#6C7B89".to_string(),
            muted: "gray".to_string(),
            key: "blue".to_string(),
        }
    }

    /// Parses a color string into a ratatui Color
    ///
    /// Supports named colors (red, green, blue, etc.) and hex colors (#RRGGBB)
    pub fn parse_color(color_str: &str) -> Color {
        match color_str.to_lowercase().as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "gray" | "grey" => Color::Gray,
            "darkgray" | "darkgrey" => Color::DarkGray,
            "white" => Color::White,
            s if s.starts_with('#') && s.len() == 7 => {
                let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&s[range], 16);
                match (channel(1..3), channel(3..5), channel(5..7)) {
                    (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
                    _ => Color::White,
                }
            }
            _ => Color::White,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_preset(ThemePreset::Dark)
    }
}

impl Theme {
    /// Creates a new theme from a preset
    pub fn from_preset(preset: ThemePreset) -> Self {
        let colors = match preset {
            ThemePreset::Dark => ThemeColors::dark(),
            ThemePreset::Light => ThemeColors::light(),
        };

        Self { preset, colors }
    }

    pub fn primary(&self) -> Color {
        ThemeColors::parse_color(&self.colors.primary)
    }

    pub fn background(&self) -> Color {
        ThemeColors::parse_color(&self.colors.background)
    }

    pub fn foreground(&self) -> Color {
        ThemeColors::parse_color(&self.colors.foreground)
    }

    pub fn success(&self) -> Color {
        ThemeColors::parse_color(&self.colors.success)
    }

    pub fn warning(&self) -> Color {
        ThemeColors::parse_color(&self.colors.warning)
    }

    pub fn error(&self) -> Color {
        ThemeColors::parse_color(&self.colors.error)
    }

    pub fn border(&self) -> Color {
        ThemeColors::parse_color(&self.colors.border)
    }

    pub fn muted(&self) -> Color {
        ThemeColors::parse_color(&self.colors.muted)
    }

    pub fn key(&self) -> Color {
        ThemeColors::parse_color(&self.colors.key)
    }
}
