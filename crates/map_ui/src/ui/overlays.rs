//! Popup cards, toasts and the fallback alert window.

use std::time::Instant;

use eframe::egui::{self, Align2, Color32, RichText, Vec2};
use map_core::notify::NotificationLevel;
use map_core::surface::{LayerId, PopupAction, PopupContent};

use crate::app::{MapsApp, Panel};
use crate::ui::rendering::{MapProjection, MARKER_RADIUS};

enum CardInput {
    Action(PopupAction),
    Close,
}

fn card_body(ui: &mut egui::Ui, content: &PopupContent) -> Option<CardInput> {
    let mut input = None;
    ui.horizontal(|ui| {
        match content {
            PopupContent::Text(text) => {
                ui.label(text);
            }
            PopupContent::Driver(card) => {
                ui.label(
                    RichText::new(&card.initials)
                        .strong()
                        .color(Color32::WHITE)
                        .background_color(Color32::from_rgb(16, 185, 129)),
                );
                ui.vertical(|ui| {
                    ui.strong(&card.name);
                    ui.label(&card.rating_label);
                    ui.small(&card.vehicle);
                });
            }
            PopupContent::City(card) => {
                ui.vertical(|ui| {
                    ui.strong(&card.name);
                    ui.label(&card.rides_label);
                    ui.label(&card.rating_label);
                });
            }
        }
        if ui.small_button("✕").clicked() {
            input = Some(CardInput::Close);
        }
    });
    for (label, action) in content.actions() {
        if ui.button(label).clicked() {
            input = Some(CardInput::Action(action.clone()));
        }
    }
    input
}

/// Draw the open popups of `panel` above their anchors and apply whatever
/// the user pressed on them.
pub fn render_popups(
    ctx: &egui::Context,
    app: &mut MapsApp,
    panel: Panel,
    projection: &MapProjection,
) {
    let open: Vec<(LayerId, egui::Pos2, PopupContent)> = app
        .scene(panel)
        .open_popups()
        .filter_map(|(id, layer)| {
            let anchor = projection.project(layer.anchor()?);
            let content = layer.popup.clone()?;
            projection
                .rect()
                .contains(anchor)
                .then_some((id, anchor, content))
        })
        .collect();

    app.popup_rects.retain(|(owner, _), _| *owner != panel);
    let mut inputs = Vec::new();
    for (layer, anchor, content) in open {
        let area = egui::Area::new(egui::Id::new(("popup", panel, layer.0)))
            .order(egui::Order::Foreground)
            .pivot(Align2::CENTER_BOTTOM)
            .fixed_pos(anchor - Vec2::new(0.0, MARKER_RADIUS + 4.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .show(ui, |ui| card_body(ui, &content))
                    .inner
            });
        app.popup_rects.insert((panel, layer), area.response.rect);
        if let Some(input) = area.inner {
            inputs.push((layer, input));
        }
    }

    for (layer, input) in inputs {
        match input {
            CardInput::Action(action) => app.dispatch_popup_action(panel, action),
            CardInput::Close => app.close_popup(panel, layer),
        }
    }
}

fn toast_fill(level: NotificationLevel) -> Color32 {
    match level {
        NotificationLevel::Success => Color32::from_rgb(16, 120, 80),
        NotificationLevel::Info => Color32::from_rgb(30, 80, 160),
        NotificationLevel::Warning => Color32::from_rgb(170, 110, 10),
        NotificationLevel::Error => Color32::from_rgb(170, 40, 40),
    }
}

pub fn render_toasts(ctx: &egui::Context, app: &MapsApp) {
    let toasts = app.toasts.visible(Instant::now());
    if toasts.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toasts"))
        .order(egui::Order::Tooltip)
        .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16.0, -16.0))
        .show(ctx, |ui| {
            for toast in &toasts {
                egui::Frame::new()
                    .fill(toast_fill(toast.notification.level))
                    .corner_radius(6.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(&toast.notification.message).color(Color32::WHITE),
                        );
                    });
                ui.add_space(6.0);
            }
        });
}

pub fn render_alert(ctx: &egui::Context, app: &MapsApp) {
    let Some(message) = app.alerts.current() else {
        return;
    };
    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(&message);
            if ui.button("OK").clicked() {
                app.alerts.acknowledge();
            }
        });
}
