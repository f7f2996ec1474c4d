use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub secondary: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_form: ColorSpec,
    pub footer_list: ColorSpec,
    pub footer_delete: ColorSpec,
    pub footer_qr: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ocean()
    }
}

impl Theme {
    /// Blue accents on the terminal background.
    ///
    pub fn ocean() -> Self {
        Theme {
            name: "ocean".to_string(),
            primary: ColorSpec::rgb(0, 123, 255),
            secondary: ColorSpec::rgb(108, 117, 125),
            banner: ColorSpec::rgb(0, 123, 255),
            text: ColorSpec::rgb(222, 226, 230),
            text_muted: ColorSpec::rgb(134, 142, 150),
            success: ColorSpec::rgb(40, 167, 69),
            warning: ColorSpec::rgb(255, 193, 7),
            error: ColorSpec::rgb(220, 53, 69),
            border_active: ColorSpec::rgb(0, 123, 255),
            border_normal: ColorSpec::rgb(73, 80, 87),
            highlight_bg: ColorSpec::rgb(0, 86, 179),
            highlight_fg: ColorSpec::rgb(255, 255, 255),
            footer_form: ColorSpec::rgb(0, 123, 255),
            footer_list: ColorSpec::rgb(40, 167, 69),
            footer_delete: ColorSpec::rgb(220, 53, 69),
            footer_qr: ColorSpec::rgb(111, 66, 193),
        }
    }

    /// Muted palette for dim rooms in the stands.
    ///
    pub fn midnight() -> Self {
        Theme {
            name: "midnight".to_string(),
            primary: ColorSpec::rgb(122, 162, 247),
            secondary: ColorSpec::rgb(86, 95, 137),
            banner: ColorSpec::rgb(187, 154, 247),
            text: ColorSpec::rgb(192, 202, 245),
            text_muted: ColorSpec::rgb(86, 95, 137),
            success: ColorSpec::rgb(158, 206, 106),
            warning: ColorSpec::rgb(224, 175, 104),
            error: ColorSpec::rgb(247, 118, 142),
            border_active: ColorSpec::rgb(122, 162, 247),
            border_normal: ColorSpec::rgb(59, 66, 97),
            highlight_bg: ColorSpec::rgb(40, 52, 87),
            highlight_fg: ColorSpec::rgb(192, 202, 245),
            footer_form: ColorSpec::rgb(122, 162, 247),
            footer_list: ColorSpec::rgb(158, 206, 106),
            footer_delete: ColorSpec::rgb(247, 118, 142),
            footer_qr: ColorSpec::rgb(187, 154, 247),
        }
    }

    /// Get theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ocean" => Some(Self::ocean()),
            "midnight" => Some(Self::midnight()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec!["ocean".to_string(), "midnight".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_available_theme_resolves() {
        for name in Theme::available_themes() {
            let theme = Theme::from_name(&name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn unknown_theme_is_none() {
        assert!(Theme::from_name("rose-pine").is_none());
    }

    #[test]
    fn default_is_ocean() {
        assert_eq!(Theme::default(), Theme::ocean());
    }

    #[test]
    fn color_spec_converts_to_rgb() {
        assert_eq!(ColorSpec::rgb(1, 2, 3).to_color(), Color::Rgb(1, 2, 3));
    }
}
