use hearth_types::ColorScheme;
use ratatui::style::Color;

use crate::app::App;

#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight_bg: Color,
}

impl ThemeColors {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            // Ember - warm orange on charcoal
            ColorScheme::Default => ThemeColors {
                primary: Color::Rgb(255, 140, 60),
                secondary: Color::Rgb(230, 180, 90),
                accent: Color::Rgb(255, 95, 80),
                text: Color::Rgb(235, 225, 215),
                text_dim: Color::Rgb(150, 135, 120),
                background: Color::Rgb(28, 24, 22),
                border: Color::Rgb(90, 70, 55),
                success: Color::Rgb(140, 210, 120),
                warning: Color::Rgb(250, 200, 80),
                error: Color::Rgb(240, 80, 70),
                highlight_bg: Color::Rgb(55, 42, 34),
            },

            // Slate with blue accents
            ColorScheme::Dark => ThemeColors {
                primary: Color::Rgb(110, 170, 255),
                secondary: Color::Rgb(160, 140, 255),
                accent: Color::Rgb(255, 120, 190),
                text: Color::Rgb(220, 222, 228),
                text_dim: Color::Rgb(125, 130, 140),
                background: Color::Rgb(18, 20, 26),
                border: Color::Rgb(58, 62, 74),
                success: Color::Rgb(110, 230, 150),
                warning: Color::Rgb(255, 195, 105),
                error: Color::Rgb(255, 105, 105),
                highlight_bg: Color::Rgb(36, 40, 52),
            },

            // Paper: dark text on off-white
            ColorScheme::Light => ThemeColors {
                primary: Color::Rgb(20, 95, 190),
                secondary: Color::Rgb(110, 60, 180),
                accent: Color::Rgb(190, 30, 100),
                text: Color::Rgb(32, 32, 36),
                text_dim: Color::Rgb(105, 105, 112),
                background: Color::Rgb(248, 247, 244),
                border: Color::Rgb(185, 182, 176),
                success: Color::Rgb(20, 140, 60),
                warning: Color::Rgb(180, 130, 0),
                error: Color::Rgb(190, 20, 20),
                highlight_bg: Color::Rgb(228, 236, 250),
            },

            // Solarized dark palette
            ColorScheme::Solarized => ThemeColors {
                primary: Color::Rgb(38, 139, 210),
                secondary: Color::Rgb(42, 161, 152),
                accent: Color::Rgb(211, 54, 130),
                text: Color::Rgb(147, 161, 161),
                text_dim: Color::Rgb(101, 123, 131),
                background: Color::Rgb(0, 43, 54),
                border: Color::Rgb(7, 54, 66),
                success: Color::Rgb(133, 153, 0),
                warning: Color::Rgb(181, 137, 0),
                error: Color::Rgb(220, 50, 47),
                highlight_bg: Color::Rgb(7, 54, 66),
            },
        }
    }
}

/// Theme for the app's current color scheme setting
pub fn get_theme_colors(app: &App) -> ThemeColors {
    ThemeColors::for_scheme(app.settings.ui.color_scheme)
}
