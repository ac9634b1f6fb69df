//! Recommendation form and the tilting card grid

use eframe::egui::{self, RichText, Stroke};

use crate::app::InsightApp;
use crate::recommend::GameRecommendation;
use crate::tilt::{BoundingRect, TiltController};
use crate::tone::Tone;

use super::components::{link_badge, section_anchor, section_frame};
use super::theme::Theme;

const CARD_HEIGHT: f32 = 440.0;
const HEADER_IMAGE_HEIGHT: f32 = 110.0;
const CARD_GAP: f32 = 24.0;
const CARD_PADDING: f32 = 16.0;

/// Render the recommendations section
pub fn render_recommendations(app: &mut InsightApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    section_anchor(ui, &mut app.nav, "recommendations");
    section_frame(theme.bg_page).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Game Recommendations")
                    .size(30.0)
                    .strong()
                    .color(theme.text_primary),
            );
            ui.add_space(4.0);
            ui.label(
                RichText::new("Describe a game or a theme and pick a mood.")
                    .color(theme.text_muted),
            );
        });

        ui.add_space(20.0);
        render_form(app, ui, &theme);
        ui.add_space(28.0);
        render_results(app, ui, &theme);
    });
}

/// Query input, tone selector and submit button
fn render_form(app: &mut InsightApp, ui: &mut egui::Ui, theme: &Theme) {
    let loading = app.recommendations.is_loading();

    ui.horizontal_wrapped(|ui| {
        let mut query = app.recommendations.query().query.clone();
        let input = egui::TextEdit::singleline(&mut query)
            .hint_text("Enter game or theme...")
            .desired_width(320.0);
        if ui.add(input).changed() {
            app.recommendations.set_query(query);
        }

        let current = app.recommendations.query().tone;
        let mut tone = current;
        egui::ComboBox::from_id_salt("tone_select")
            .selected_text(tone.label())
            .width(160.0)
            .show_ui(ui, |ui| {
                for option in Tone::all() {
                    ui.selectable_value(&mut tone, *option, option.label());
                }
            });
        if tone != current {
            app.recommendations.set_tone(tone);
        }

        let label = if loading { "Loading..." } else { "Get Recommendations" };
        let button = egui::Button::new(RichText::new(label).color(theme.text_primary))
            .fill(theme.accent)
            .min_size(egui::vec2(180.0, 0.0));
        if ui.add(button).clicked() {
            app.recommendations.submit();
        }
    });
}

fn render_results(app: &mut InsightApp, ui: &mut egui::Ui, theme: &Theme) {
    let view = app.recommendations.view();

    if view.loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Fetching recommendations...").color(theme.text_muted));
        });
        ui.add_space(12.0);
    }

    if view.show_empty_message {
        ui.label(RichText::new("No recommendations found.").color(theme.text_muted));
        return;
    }

    if view.cards.is_empty() {
        return;
    }

    let tilts = &mut app.card_tilts;
    if tilts.len() != view.cards.len() {
        tilts.resize_with(view.cards.len(), TiltController::new);
    }

    let width = ui.available_width();
    let columns = if width > 900.0 {
        3
    } else if width > 560.0 {
        2
    } else {
        1
    };
    let card_width = (width - CARD_GAP * (columns - 1) as f32) / columns as f32;
    let card_size = egui::vec2(card_width, CARD_HEIGHT);

    for (row_index, row) in view.cards.chunks(columns).enumerate() {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = CARD_GAP;
            for (offset, game) in row.iter().enumerate() {
                let index = row_index * columns + offset;
                render_card(ui, theme, game, &mut tilts[index], card_size);
            }
        });
        ui.add_space(CARD_GAP);
    }
}

/// One recommendation card, tilted toward the pointer while hovered
fn render_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    game: &GameRecommendation,
    tilt: &mut TiltController,
    size: egui::Vec2,
) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());

    match ui.ctx().pointer_hover_pos() {
        Some(pos) if ui.rect_contains_pointer(rect) => {
            tilt.on_pointer_move(pos.x, pos.y, Some(BoundingRect::from(rect)));
        }
        _ => tilt.on_pointer_leave(),
    }

    let (outline, content_rect) = match tilt.transform() {
        Some(transform) => {
            let corners = transform
                .project_corners(&BoundingRect::from(rect))
                .map(|(x, y)| egui::pos2(x, y));
            let inset = rect.size() * ((1.0 - transform.scale) / 2.0);
            (corners.to_vec(), rect.shrink2(inset))
        }
        None => (
            vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()],
            rect,
        ),
    };

    ui.painter()
        .add(egui::Shape::convex_polygon(outline, theme.bg_card, Stroke::new(1.0, theme.border)));

    ui.scope_builder(
        egui::UiBuilder::new().max_rect(content_rect.shrink(CARD_PADDING)),
        |ui| {
            if let Some(uri) = game.header_image_link() {
                ui.add(
                    egui::Image::from_uri(uri)
                        .fit_to_exact_size(egui::vec2(ui.available_width(), HEADER_IMAGE_HEIGHT))
                        .maintain_aspect_ratio(true)
                        .corner_radius(6),
                );
                ui.add_space(8.0);
            }
            ui.label(
                RichText::new(&game.title)
                    .size(17.0)
                    .strong()
                    .color(theme.text_primary),
            );
            ui.add_space(6.0);

            detail_line(ui, theme, "Released", &game.release_date);
            detail_line(ui, theme, "Price", &game.price);
            detail_line(ui, theme, "Developer", &game.developer);
            if let Some(genres) = &game.genres {
                detail_line(ui, theme, "Genres", genres);
            }

            ui.add_space(6.0);
            ui.add(
                egui::Label::new(
                    RichText::new(&game.description)
                        .size(12.5)
                        .color(theme.text_secondary),
                )
                .wrap(),
            );

            ui.add_space(8.0);
            ui.horizontal_wrapped(|ui| {
                if let Some(link) = game.video_link() {
                    link_badge(ui, "View Movie", theme.movie_link, link);
                }
                if let Some(link) = game.screenshot_link() {
                    link_badge(ui, "View Screenshot", theme.screenshot_link, link);
                }
            });
        },
    );

    // Keep the pointer tracking fresh while tilted
    if tilt.transform().is_some() {
        ui.ctx().request_repaint();
    }
}

fn detail_line(ui: &mut egui::Ui, theme: &Theme, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{}:", label)).size(12.0).color(theme.text_muted));
        ui.label(RichText::new(value).size(12.0).color(theme.text_secondary));
    });
}
