use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use eframe::egui;

use crate::app_data::site;
use crate::config::Config;
use crate::recommend::HttpRecommendationClient;
use crate::state::{
    AudioState, HeroCarousel, NavState, RecommendationController, RequestStatus, StateEvent, UiState,
};
use crate::tilt::TiltController;
use crate::timeline;
use crate::ui;

/// Main application state
pub struct InsightApp {
    /// Application configuration
    pub config: Config,
    /// Theme, status bar, scroll position
    pub ui: UiState,
    /// Navigation bar visibility and scroll targets
    pub nav: NavState,
    /// Background audio toggle
    pub audio: AudioState,
    /// Hero clip carousel
    pub hero: HeroCarousel,
    /// Query inputs and the outstanding request
    pub recommendations: RecommendationController,
    /// One tilt tracker per displayed card, in display order
    pub card_tilts: Vec<TiltController>,
    /// Animated nav bar offset and opacity
    pub nav_offset: f32,
    pub nav_opacity: f32,
    /// Width of the page as last laid out
    pub page_width: f32,
}

impl InsightApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Result<Self> {
        // Card header images are fetched over http and decoded by `image`
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let client = HttpRecommendationClient::new(&config.service)?;
        tracing::info!("Recommendation endpoint: {}", client.endpoint());

        let theme = config.interface.theme.theme();
        let audio = AudioState::new(config.interface.audio_on_start);

        Ok(Self {
            ui: UiState::new(theme),
            nav: NavState::default(),
            audio,
            hero: HeroCarousel::new(site().hero.total_videos),
            recommendations: RecommendationController::new(Arc::new(client)),
            card_tilts: Vec::new(),
            nav_offset: 0.0,
            nav_opacity: 1.0,
            page_width: site().window.initial_size[0],
            config,
        })
    }

    fn handle_events(&mut self, events: Vec<StateEvent>) {
        for event in events {
            match event {
                StateEvent::StatusMessage(msg) => self.ui.status_message = msg,
                StateEvent::RecommendationsChanged => {
                    let count = self.recommendations.results().len();
                    self.card_tilts = vec![TiltController::new(); count];
                }
            }
        }
    }

    /// Advance the hero carousel and schedule the next repaint it needs
    fn tick_hero(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);

        if self.hero.is_loading() {
            self.hero.on_video_loaded(now);
        }

        let Some(loaded_at) = self.hero.loaded_at() else {
            return;
        };

        let interval = self.config.interface.hero_interval_secs.max(1) as f64;
        let elapsed = now - loaded_at;
        if elapsed >= interval {
            self.hero.on_video_end();
            self.hero.on_video_loaded(now);
            ctx.request_repaint();
        } else if elapsed < timeline::HERO_FADE_SECS {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_secs_f64(interval - elapsed));
        }
    }

    fn tick_nav(&mut self, ctx: &egui::Context) {
        let dt = ctx.input(|i| i.stable_dt);
        let (target_offset, target_opacity) = timeline::nav_offset(self.nav.is_visible());

        self.nav_offset = timeline::approach(self.nav_offset, target_offset, dt, timeline::NAV_TWEEN_SECS);
        self.nav_opacity = timeline::approach(self.nav_opacity, target_opacity, dt, timeline::NAV_TWEEN_SECS);

        if (self.nav_offset - target_offset).abs() > 0.5 || self.audio.indicator_active() {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for InsightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        // Poll async tasks
        let events = self.recommendations.poll();
        self.handle_events(events);
        if self.recommendations.is_loading() {
            ctx.request_repaint();
        }

        self.tick_hero(ctx);
        self.tick_nav(ctx);

        // Status bar at bottom
        let status_color = match self.recommendations.current_state() {
            RequestStatus::Failed(_) => self.ui.current_theme.error,
            _ => self.ui.current_theme.text_muted,
        };
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.ui.status_message).color(status_color));
            });
        });

        // Single scrolling page with all sections
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.ui.current_theme.bg_page))
            .show(ctx, |ui| {
                self.page_width = ui.max_rect().width();

                let output = egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui::render_hero(self, ui);
                        ui::render_about(self, ui);
                        ui::render_recommendations(self, ui);
                        ui::render_contact(self, ui);
                        ui::render_footer(self, ui);
                    });

                self.ui.scroll_y = output.state.offset.y;
                self.nav.on_scroll(self.ui.scroll_y);
            });

        ui::render_nav(self, ctx);
        ui::render_about_dialog(self, ctx);
    }
}
