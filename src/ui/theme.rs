use eframe::egui::{self, Color32, Stroke, Visuals, style::WidgetVisuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Violet,
    Midnight,
    Ember,
}

impl ThemePreset {
    /// Get all available presets
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Violet, ThemePreset::Midnight, ThemePreset::Ember]
    }

    /// Get display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Violet => "Violet",
            ThemePreset::Midnight => "Midnight",
            ThemePreset::Ember => "Ember",
        }
    }

    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Violet => Theme::violet(),
            ThemePreset::Midnight => Theme::midnight(),
            ThemePreset::Ember => Theme::ember(),
        }
    }
}

impl std::str::FromStr for ThemePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemePreset::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown theme: {} (expected violet, midnight or ember)", s))
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // Page backgrounds
    pub bg_page: Color32,
    pub bg_section: Color32,
    pub bg_card: Color32,
    pub bg_raised: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,
    pub accent_muted: Color32,

    // Card link badges
    pub movie_link: Color32,
    pub screenshot_link: Color32,

    // Semantic colors
    pub error: Color32,

    // UI element colors
    pub border: Color32,
    pub footer: Color32,
}

impl Theme {
    /// Violet theme, the brand palette
    pub fn violet() -> Self {
        Self {
            bg_page: Color32::from_rgb(0, 0, 0),
            bg_section: Color32::from_rgb(12, 10, 24),
            bg_card: Color32::from_rgb(24, 24, 27), // Zinc-900
            bg_raised: Color32::from_rgb(39, 39, 42),

            text_primary: Color32::from_rgb(255, 255, 255),
            text_secondary: Color32::from_rgb(219, 234, 254), // Blue-100
            text_muted: Color32::from_rgb(156, 163, 175),     // Gray-400

            accent: Color32::from_rgb(85, 66, 255),
            accent_hover: Color32::from_rgb(120, 105, 255),
            accent_muted: Color32::from_rgb(37, 99, 235), // Blue-600

            movie_link: Color32::from_rgb(147, 51, 234),     // Purple-600
            screenshot_link: Color32::from_rgb(22, 163, 74), // Green-600

            error: Color32::from_rgb(239, 68, 68),

            border: Color32::from_rgb(63, 63, 70),
            footer: Color32::from_rgb(85, 66, 255),
        }
    }

    /// Midnight theme, cool blues
    pub fn midnight() -> Self {
        Self {
            bg_page: Color32::from_rgb(8, 12, 22),
            bg_section: Color32::from_rgb(15, 23, 42),
            bg_card: Color32::from_rgb(22, 33, 54),
            bg_raised: Color32::from_rgb(35, 48, 70),

            text_primary: Color32::from_rgb(248, 250, 252),
            text_secondary: Color32::from_rgb(200, 210, 220),
            text_muted: Color32::from_rgb(130, 145, 160),

            accent: Color32::from_rgb(6, 182, 212),
            accent_hover: Color32::from_rgb(34, 211, 238),
            accent_muted: Color32::from_rgb(8, 140, 165),

            movie_link: Color32::from_rgb(129, 140, 248),
            screenshot_link: Color32::from_rgb(52, 211, 153),

            error: Color32::from_rgb(251, 113, 133),

            border: Color32::from_rgb(51, 65, 85),
            footer: Color32::from_rgb(8, 140, 165),
        }
    }

    /// Ember theme, warm and high contrast
    pub fn ember() -> Self {
        Self {
            bg_page: Color32::from_rgb(16, 12, 10),
            bg_section: Color32::from_rgb(28, 20, 16),
            bg_card: Color32::from_rgb(40, 28, 22),
            bg_raised: Color32::from_rgb(58, 40, 30),

            text_primary: Color32::from_rgb(255, 247, 237),
            text_secondary: Color32::from_rgb(254, 215, 170),
            text_muted: Color32::from_rgb(168, 140, 120),

            accent: Color32::from_rgb(249, 115, 22),
            accent_hover: Color32::from_rgb(251, 146, 60),
            accent_muted: Color32::from_rgb(194, 65, 12),

            movie_link: Color32::from_rgb(190, 24, 93),
            screenshot_link: Color32::from_rgb(101, 163, 13),

            error: Color32::from_rgb(248, 113, 113),

            border: Color32::from_rgb(87, 62, 48),
            footer: Color32::from_rgb(194, 65, 12),
        }
    }

    fn widget(&self, fill: Color32, outline: Color32, text: Color32, base: WidgetVisuals) -> WidgetVisuals {
        WidgetVisuals {
            bg_fill: fill,
            weak_bg_fill: fill,
            bg_stroke: Stroke::new(1.0, outline),
            fg_stroke: Stroke::new(1.0, text),
            ..base
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.bg_section;
        visuals.panel_fill = self.bg_page;
        visuals.faint_bg_color = self.bg_section;
        visuals.extreme_bg_color = self.bg_card;

        let w = visuals.widgets.clone();
        visuals.widgets.noninteractive =
            self.widget(self.bg_section, self.border, self.text_secondary, w.noninteractive);
        visuals.widgets.inactive = self.widget(self.bg_raised, self.border, self.text_primary, w.inactive);
        visuals.widgets.hovered = self.widget(self.bg_raised, self.accent, self.text_primary, w.hovered);
        visuals.widgets.active =
            self.widget(self.accent_muted, self.accent_hover, self.text_primary, w.active);
        visuals.widgets.open = self.widget(self.bg_raised, self.accent, self.text_primary, w.open);

        visuals.selection.bg_fill = self.accent.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent_hover;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_name() {
        assert_eq!("Midnight".parse::<ThemePreset>().unwrap(), ThemePreset::Midnight);
        assert_eq!("ember".parse::<ThemePreset>().unwrap(), ThemePreset::Ember);
        assert!("amber".parse::<ThemePreset>().is_err());
    }
}
