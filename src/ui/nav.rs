//! Floating navigation bar with the audio toggle

use eframe::egui::{self, RichText};

use crate::app::InsightApp;
use crate::app_data::site;
use crate::timeline;

const INDICATOR_BARS: u32 = 4;

/// Render the navigation bar over the page
pub fn render_nav(app: &mut InsightApp, ctx: &egui::Context) {
    if app.nav_opacity <= 0.01 {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let fill = if app.nav.is_floating() {
        theme.bg_card
    } else {
        egui::Color32::TRANSPARENT
    };
    let width = (app.page_width - 32.0).max(200.0);

    egui::Area::new(egui::Id::new("nav_bar"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(16.0, 8.0 + app.nav_offset))
        .show(ctx, |ui| {
            ui.set_opacity(app.nav_opacity);
            egui::Frame::new()
                .fill(fill)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(16, 8))
                .show(ui, |ui| {
                    ui.set_width(width - 32.0);
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&site().brand.name)
                                .strong()
                                .size(16.0)
                                .color(theme.accent_hover),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            render_audio_toggle(app, ui);
                            ui.add_space(12.0);

                            for item in site().nav.items.iter().rev() {
                                let label = RichText::new(item.label.to_uppercase())
                                    .size(11.0)
                                    .color(theme.text_secondary);
                                if ui.add(egui::Button::new(label).frame(false)).clicked() {
                                    app.nav.scroll_to(&item.id);
                                }
                            }
                        });
                    });
                });
        });
}

/// Animated bars that start and stop the background track
fn render_audio_toggle(app: &mut InsightApp, ui: &mut egui::Ui) {
    let theme = &app.ui.current_theme;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(28.0, 18.0), egui::Sense::click());
    let time = ui.input(|i| i.time);
    let active = app.audio.indicator_active();

    let bar_width = 3.0;
    let gap = (rect.width() - bar_width * INDICATOR_BARS as f32) / (INDICATOR_BARS - 1) as f32;
    for bar in 1..=INDICATOR_BARS {
        let height = rect.height() * timeline::indicator_bar_height(bar, time, active);
        let x = rect.left() + (bar - 1) as f32 * (bar_width + gap);
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(x, rect.bottom() - height),
            egui::pos2(x + bar_width, rect.bottom()),
        );
        ui.painter().rect_filled(bar_rect, 1.0, theme.text_secondary);
    }

    let tooltip = if app.audio.is_playing() { "Pause music" } else { "Play music" };
    if response.on_hover_text(tooltip).clicked() {
        app.audio.toggle();
        tracing::debug!("Background audio playing: {}", app.audio.is_playing());
    }
}
