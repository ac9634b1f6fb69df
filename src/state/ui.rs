//! UI-related application state

use egui_commonmark::CommonMarkCache;

use crate::ui::theme::Theme;

/// UI-related state
pub struct UiState {
    /// Cache for markdown rendering
    pub markdown_cache: CommonMarkCache,
    /// Current theme
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
    /// Status bar text
    pub status_message: String,
    /// Scroll offset of the page, updated every frame
    pub scroll_y: f32,
    /// Page offset of the hero frame's bottom edge as last laid out
    pub hero_bottom: f32,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            markdown_cache: CommonMarkCache::default(),
            current_theme: theme,
            theme_dirty: true, // Apply theme on first frame
            show_about_dialog: false,
            status_message: "Ready".to_string(),
            scroll_y: 0.0,
            hero_bottom: 0.0,
        }
    }
}
