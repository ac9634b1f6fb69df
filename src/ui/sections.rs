//! Static page sections: about, contact and footer

use eframe::egui::{self, RichText};
use egui_commonmark::CommonMarkViewer;

use crate::app::InsightApp;
use crate::app_data::site;

use super::components::{link_badge, section_anchor, section_frame};

/// Render the about section
pub fn render_about(app: &mut InsightApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let about = &site().about;

    section_anchor(ui, &mut app.nav, "about");
    section_frame(theme.bg_section).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            RichText::new(&about.title)
                .size(28.0)
                .strong()
                .color(theme.text_primary),
        );
        ui.add_space(12.0);
        CommonMarkViewer::new().show(ui, &mut app.ui.markdown_cache, &about.body);
    });
}

/// Render the contact section
pub fn render_contact(app: &mut InsightApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let contact = &site().contact;

    section_anchor(ui, &mut app.nav, "contact");
    section_frame(theme.bg_section).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            RichText::new("Contact")
                .size(28.0)
                .strong()
                .color(theme.text_primary),
        );
        ui.add_space(12.0);
        CommonMarkViewer::new().show(ui, &mut app.ui.markdown_cache, &contact.body);

        ui.add_space(16.0);
        ui.horizontal_wrapped(|ui| {
            for link in &contact.links {
                link_badge(ui, &link.label, theme.accent, &link.url);
            }
        });
    });
}

/// Render the footer
pub fn render_footer(app: &mut InsightApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    section_anchor(ui, &mut app.nav, "footer");
    section_frame(theme.footer).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new(&site().footer.text).color(theme.text_primary));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.link(RichText::new("About").color(theme.text_primary)).clicked() {
                    app.ui.show_about_dialog = true;
                }
            });
        });
    });
}
