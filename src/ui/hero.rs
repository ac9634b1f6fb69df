//! Hero section: clip carousel inside a scroll-driven frame

use eframe::egui::{self, Align2, Color32, FontId, RichText, Stroke};

use crate::app::InsightApp;
use crate::app_data::site;
use crate::state::HeroCarousel;
use crate::timeline;

use super::components::section_anchor;

const HERO_HEIGHT: f32 = 460.0;
/// Space kept above the frame for the floating nav bar
const NAV_CLEARANCE: f32 = 56.0;

/// Backdrop tints cycled per clip, standing in for the clip itself
const CLIP_TINTS: [Color32; 4] = [
    Color32::from_rgb(45, 32, 110),
    Color32::from_rgb(20, 60, 105),
    Color32::from_rgb(90, 30, 70),
    Color32::from_rgb(30, 80, 60),
];

/// Page offset of the frame's bottom edge, the hero being first on the page
pub fn frame_bottom() -> f32 {
    NAV_CLEARANCE + HERO_HEIGHT
}

/// Render the hero section
pub fn render_hero(app: &mut InsightApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let content = site();

    section_anchor(ui, &mut app.nav, "hero");
    ui.add_space(NAV_CLEARANCE);

    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), HERO_HEIGHT), egui::Sense::hover());
    app.ui.hero_bottom = frame_bottom();

    let painter = ui.painter_at(rect);
    let now = ui.input(|i| i.time);

    // Frame outline follows scroll progress
    let progress = timeline::hero_scroll_progress(app.ui.scroll_y, HERO_HEIGHT);
    let outline: Vec<egui::Pos2> = timeline::hero_frame_polygon(progress)
        .iter()
        .map(|&(fx, fy)| rect.min + egui::vec2(fx * rect.width(), fy * rect.height()))
        .collect();

    let opacity = app.hero.loaded_at().map(|t| timeline::fade_in(now - t)).unwrap_or(0.0);
    let tint = CLIP_TINTS[(app.hero.current() as usize - 1) % CLIP_TINTS.len()];
    painter.add(egui::Shape::convex_polygon(
        outline,
        tint.gamma_multiply(opacity.max(0.15)),
        Stroke::NONE,
    ));

    let src = HeroCarousel::video_src(&content.hero.video_pattern, app.hero.current());
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        &src,
        FontId::monospace(13.0),
        theme.text_muted.gamma_multiply(opacity),
    );

    painter.text(
        rect.left_bottom() + egui::vec2(40.0, -96.0),
        Align2::LEFT_BOTTOM,
        &content.brand.tagline,
        FontId::proportional(40.0),
        theme.text_primary,
    );
    painter.text(
        rect.left_bottom() + egui::vec2(40.0, -64.0),
        Align2::LEFT_BOTTOM,
        &content.brand.subtitle,
        FontId::proportional(16.0),
        theme.text_secondary,
    );

    let sound = if HeroCarousel::is_muted(app.ui.scroll_y, app.ui.hero_bottom) || !app.audio.is_playing() {
        "muted"
    } else {
        "sound on"
    };
    painter.text(
        rect.right_top() + egui::vec2(-16.0, 16.0),
        Align2::RIGHT_TOP,
        format!("{} / {}  ·  {}", app.hero.current(), app.hero.total(), sound),
        FontId::proportional(12.0),
        theme.text_muted,
    );

    // Carousel controls
    let button_size = egui::vec2(36.0, 36.0);
    let prev_rect = egui::Rect::from_center_size(
        egui::pos2(rect.left() + 32.0, rect.center().y),
        button_size,
    );
    let next_rect = egui::Rect::from_center_size(
        egui::pos2(rect.right() - 32.0, rect.center().y),
        button_size,
    );
    if ui.put(prev_rect, egui::Button::new(RichText::new("<").size(18.0))).clicked() {
        app.hero.prev();
    }
    if ui.put(next_rect, egui::Button::new(RichText::new(">").size(18.0))).clicked() {
        app.hero.next();
    }

    if app.hero.is_loading() {
        painter.rect_filled(rect, 0.0, theme.bg_section.gamma_multiply(0.8));
        ui.put(
            egui::Rect::from_center_size(rect.center(), egui::vec2(32.0, 32.0)),
            egui::Spinner::new().size(32.0).color(theme.accent_hover),
        );
    }
}
