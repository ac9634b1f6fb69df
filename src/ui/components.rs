//! Shared UI components

use eframe::egui::{self, Color32, RichText};

use crate::app::InsightApp;
use crate::app_data::site;
use crate::state::NavState;

/// Horizontal padding of every page section
pub const SECTION_MARGIN: i8 = 32;

/// Mark the top of a section so the nav bar can scroll to it
pub fn section_anchor(ui: &mut egui::Ui, nav: &mut NavState, section_id: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 0.0), egui::Sense::hover());
    if nav.take_target(section_id) {
        ui.scroll_to_rect(rect, Some(egui::Align::TOP));
    }
}

/// Full-width frame for a page section
pub fn section_frame(fill: Color32) -> egui::Frame {
    egui::Frame::new()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(SECTION_MARGIN, 40))
}

/// Colored pill button that opens `url` externally
pub fn link_badge(ui: &mut egui::Ui, label: &str, fill: Color32, url: &str) {
    let button = egui::Button::new(RichText::new(label).size(11.0).color(Color32::WHITE))
        .fill(fill)
        .corner_radius(4.0);

    if ui.add(button).on_hover_text(url).clicked() {
        open_external(url);
    }
}

/// Open a link in the system browser
pub fn open_external(url: &str) {
    tracing::debug!("Opening {}", url);
    if let Err(e) = open::that(url) {
        tracing::warn!("Failed to open {}: {}", url, e);
    }
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut InsightApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = &app.ui.current_theme;
    let brand = &site().brand;

    egui::Window::new(format!("About {}", brand.name))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 240.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);

                ui.label(RichText::new(&brand.name).size(22.0).strong().color(theme.accent_hover));

                ui.add_space(4.0);
                ui.label(RichText::new(&brand.subtitle).size(14.0).color(theme.text_secondary));

                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted)
                );

                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Service: {}", app.config.service.base_url))
                        .size(11.0)
                        .color(theme.text_muted)
                );

                ui.add_space(12.0);
                ui.label(
                    RichText::new("Built with Rust + egui")
                        .size(11.0)
                        .color(theme.text_muted)
                );

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }

                ui.add_space(8.0);
            });
        });
}
