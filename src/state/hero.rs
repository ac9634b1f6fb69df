//! Hero video carousel state

/// Which hero clip is showing and whether it has loaded
#[derive(Debug, Clone)]
pub struct HeroCarousel {
    /// 1-based index of the current clip
    current: u32,
    total: u32,
    loading: bool,
    /// Time (seconds, UI clock) the current clip finished loading
    loaded_at: Option<f64>,
}

impl HeroCarousel {
    pub fn new(total: u32) -> Self {
        Self {
            current: 1,
            total: total.max(1),
            loading: true,
            loaded_at: None,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn loaded_at(&self) -> Option<f64> {
        self.loaded_at
    }

    fn following(&self) -> u32 {
        if self.current == self.total {
            1
        } else {
            self.current + 1
        }
    }

    /// User asked for the next clip
    pub fn next(&mut self) {
        self.current = self.following();
        self.begin_loading();
    }

    /// User asked for the previous clip
    pub fn prev(&mut self) {
        self.current = if self.current == 1 {
            self.total
        } else {
            self.current - 1
        };
        self.begin_loading();
    }

    /// Current clip played to the end
    pub fn on_video_end(&mut self) {
        self.current = self.following();
        self.loaded_at = None;
    }

    /// Current clip is ready to show; starts the fade-in
    pub fn on_video_loaded(&mut self, now: f64) {
        self.loading = false;
        self.loaded_at = Some(now);
    }

    fn begin_loading(&mut self) {
        self.loading = true;
        self.loaded_at = None;
    }

    /// Source path for clip `index`, from a pattern like `/videos/hero-{index}.mp4`
    pub fn video_src(pattern: &str, index: u32) -> String {
        pattern.replace("{index}", &index.to_string())
    }

    /// The hero clip is muted once its bottom edge has scrolled above the viewport
    pub fn is_muted(scroll_y: f32, hero_bottom: f32) -> bool {
        scroll_y >= hero_bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_to_first() {
        let mut hero = HeroCarousel::new(7);
        for _ in 0..6 {
            hero.next();
        }
        assert_eq!(hero.current(), 7);
        hero.next();
        assert_eq!(hero.current(), 1);
    }

    #[test]
    fn test_prev_wraps_to_last() {
        let mut hero = HeroCarousel::new(7);
        hero.prev();
        assert_eq!(hero.current(), 7);
        hero.prev();
        assert_eq!(hero.current(), 6);
    }

    #[test]
    fn test_video_end_advances_without_loading_screen() {
        let mut hero = HeroCarousel::new(3);
        hero.on_video_loaded(1.0);
        hero.on_video_end();
        assert_eq!(hero.current(), 2);
        assert!(!hero.is_loading());
        assert_eq!(hero.loaded_at(), None);
    }

    #[test]
    fn test_manual_change_shows_loading() {
        let mut hero = HeroCarousel::new(3);
        hero.on_video_loaded(0.5);
        assert!(!hero.is_loading());
        hero.next();
        assert!(hero.is_loading());
    }

    #[test]
    fn test_video_src() {
        assert_eq!(
            HeroCarousel::video_src("/videos/hero-{index}.mp4", 4),
            "/videos/hero-4.mp4"
        );
    }

    #[test]
    fn test_muted_after_scrolling_past_hero() {
        assert!(!HeroCarousel::is_muted(0.0, 600.0));
        assert!(!HeroCarousel::is_muted(599.0, 600.0));
        assert!(HeroCarousel::is_muted(600.0, 600.0));
    }
}
