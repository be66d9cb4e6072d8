//! Color themes.
//!
//! The default "core" theme mirrors the site palette: deep blues over near
//! black with white accents.

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub heading: Color,
    pub accent: Color,
    pub accent_light: Color,
    pub accent_dark: Color,
    pub error: Color,
    pub success: Color,
    pub panel_bg: Color,
    pub star_colors: [Color; 4],
}

impl Theme {
    pub fn core() -> Self {
        Self {
            name: "core",
            bg: Color::Rgb(5, 8, 16),
            fg: Color::Rgb(220, 228, 240),
            dim: Color::Rgb(110, 122, 140),
            heading: Color::Rgb(255, 255, 255),
            accent: Color::Rgb(74, 144, 226),
            accent_light: Color::Rgb(107, 182, 255),
            accent_dark: Color::Rgb(46, 92, 138),
            error: Color::Rgb(235, 87, 87),
            success: Color::Rgb(82, 196, 140),
            panel_bg: Color::Rgb(10, 14, 24),
            star_colors: [
                Color::Rgb(74, 144, 226),
                Color::Rgb(107, 182, 255),
                Color::Rgb(46, 92, 138),
                Color::Rgb(255, 255, 255),
            ],
        }
    }

    /// Low-color fallback for terminals without RGB support.
    pub fn mono() -> Self {
        Self {
            name: "mono",
            bg: Color::Black,
            fg: Color::White,
            dim: Color::DarkGray,
            heading: Color::White,
            accent: Color::Blue,
            accent_light: Color::LightBlue,
            accent_dark: Color::DarkGray,
            error: Color::Red,
            success: Color::Green,
            panel_bg: Color::Black,
            star_colors: [Color::Blue, Color::LightBlue, Color::DarkGray, Color::White],
        }
    }

    /// Unknown names fall back to the default with a warning.
    pub fn named(name: &str) -> Self {
        match name {
            "core" => Self::core(),
            "mono" => Self::mono(),
            other => {
                tracing::warn!("unknown theme '{}', using 'core'", other);
                Self::core()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::core()
    }
}
