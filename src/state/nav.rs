//! Navigation bar visibility and background audio toggle

/// Navigation bar visibility, driven by scroll direction
#[derive(Debug, Clone)]
pub struct NavState {
    visible: bool,
    floating: bool,
    last_scroll_y: f32,
    /// Section the user asked to jump to, consumed by the renderer
    pending_target: Option<String>,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            visible: true,
            floating: false,
            last_scroll_y: 0.0,
            pending_target: None,
        }
    }
}

impl NavState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Floating bars get a solid background
    pub fn is_floating(&self) -> bool {
        self.floating
    }

    /// Feed the current scroll offset.
    ///
    /// At the top the bar docks; scrolling down hides it, scrolling up brings
    /// it back as a floating bar.
    pub fn on_scroll(&mut self, scroll_y: f32) {
        if scroll_y == 0.0 {
            self.visible = true;
            self.floating = false;
        } else if scroll_y > self.last_scroll_y {
            self.visible = false;
            self.floating = true;
        } else if scroll_y < self.last_scroll_y {
            self.visible = true;
            self.floating = true;
        }

        self.last_scroll_y = scroll_y;
    }

    pub fn scroll_to(&mut self, section_id: &str) {
        self.pending_target = Some(section_id.to_string());
    }

    /// Take the pending scroll target if it matches `section_id`
    pub fn take_target(&mut self, section_id: &str) -> bool {
        if self.pending_target.as_deref() == Some(section_id) {
            self.pending_target = None;
            true
        } else {
            false
        }
    }
}

/// Background audio toggle and its indicator
#[derive(Debug, Clone, Default)]
pub struct AudioState {
    playing: bool,
    indicator_active: bool,
}

impl AudioState {
    pub fn new(playing: bool) -> Self {
        Self {
            playing,
            indicator_active: playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn indicator_active(&self) -> bool {
        self.indicator_active
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
        self.indicator_active = !self.indicator_active;
        tracing::debug!("Audio {}", if self.playing { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_down_hides_scroll_up_shows() {
        let mut nav = NavState::default();
        assert!(nav.is_visible());
        assert!(!nav.is_floating());

        nav.on_scroll(120.0);
        assert!(!nav.is_visible());
        assert!(nav.is_floating());

        nav.on_scroll(80.0);
        assert!(nav.is_visible());
        assert!(nav.is_floating());
    }

    #[test]
    fn test_top_of_page_docks() {
        let mut nav = NavState::default();
        nav.on_scroll(300.0);
        nav.on_scroll(0.0);
        assert!(nav.is_visible());
        assert!(!nav.is_floating());
    }

    #[test]
    fn test_same_offset_keeps_state() {
        let mut nav = NavState::default();
        nav.on_scroll(300.0);
        nav.on_scroll(300.0);
        assert!(!nav.is_visible());
    }

    #[test]
    fn test_scroll_target_is_consumed_once() {
        let mut nav = NavState::default();
        nav.scroll_to("contact");
        assert!(!nav.take_target("about"));
        assert!(nav.take_target("contact"));
        assert!(!nav.take_target("contact"));
    }

    #[test]
    fn test_audio_toggle() {
        let mut audio = AudioState::default();
        audio.toggle();
        assert!(audio.is_playing());
        assert!(audio.indicator_active());
        audio.toggle();
        assert!(!audio.is_playing());
        assert!(!audio.indicator_active());
    }
}
