//! The two map panels and their pointer input.

use eframe::egui::{self, Pos2, Rect, Sense};
use map_core::cities::City;
use map_core::route::RouteState;
use map_core::surface::{MapEvent, MapSurface};

use crate::app::{MapsApp, Panel};
use crate::ui::overlays::render_popups;
use crate::ui::rendering::{hit_test, paint_scene, MapProjection};

const MIN_ZOOM: u8 = 2;

fn route_hint(state: RouteState) -> &'static str {
    match state {
        RouteState::NoSelection => "Click the map to set a pickup point.",
        RouteState::PickupSet { .. } => "Click again to set the destination.",
        RouteState::RouteComplete { .. } => "Click anywhere to start a new route.",
    }
}

pub fn render_ride_panel(ui: &mut egui::Ui, app: &mut MapsApp) {
    ui.horizontal(|ui| {
        ui.heading("Book a ride");
        if ui.button("📍 Center on me").clicked() {
            app.page.ride_map.recenter_on_user();
        }
    });
    ui.horizontal(|ui| {
        ui.label(route_hint(app.page.ride_map.route_state()));
        if let Some(estimate) = app.page.ride_map.estimate() {
            ui.separator();
            ui.strong(format!(
                "${:.2} · {:.1} km",
                estimate.fare, estimate.distance_km
            ));
        }
    });

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let Some(view) = app.scene(Panel::Ride).view().copied() else {
        return;
    };
    let mut projection = MapProjection::new(&view, response.rect);

    if view.interactions.dragging && response.dragged() {
        let delta = response.drag_delta();
        let center = projection.unproject(response.rect.center() - delta);
        app.page.ride_map.surface_mut().set_view(center, view.zoom);
    }
    if view.interactions.scroll_wheel_zoom && response.hovered() {
        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        let max_zoom = app.page.ride_map.config().tiles.max_zoom;
        let zoom = if scroll > 0.0 {
            view.zoom.saturating_add(1).min(max_zoom)
        } else if scroll < 0.0 {
            view.zoom.saturating_sub(1).max(MIN_ZOOM)
        } else {
            view.zoom
        };
        if zoom != view.zoom {
            let center = app
                .scene(Panel::Ride)
                .view()
                .map(|current| current.center)
                .unwrap_or(view.center);
            app.page.ride_map.surface_mut().set_view(center, zoom);
        }
    }
    if let Some(current) = app.scene(Panel::Ride).view() {
        projection = MapProjection::new(current, response.rect);
    }

    paint_scene(&painter, &projection, app.scene(Panel::Ride));

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            match hit_test(app.scene(Panel::Ride), &projection, pos, |_| true) {
                Some(layer) => app.open_popup(Panel::Ride, layer),
                None => app.dispatch(Panel::Ride, MapEvent::Click(projection.unproject(pos))),
            }
        }
    }

    render_popups(ui.ctx(), app, Panel::Ride, &projection);
}

fn city_picker(ui: &mut egui::Ui, app: &mut MapsApp) {
    let cities: Vec<City> = app.page.promo_map.cities().to_vec();
    let mut choice = app.selected_city;
    egui::ComboBox::from_label("Highlight")
        .selected_text(choice.unwrap_or("Choose a city"))
        .show_ui(ui, |ui| {
            for city in &cities {
                ui.selectable_value(&mut choice, Some(city.name), city.name);
            }
        });
    if choice != app.selected_city {
        if let Some(name) = choice {
            app.highlight_city(name);
        }
    }
}

fn pointer_on_card(app: &MapsApp, pointer: Option<Pos2>) -> bool {
    let Some(pointer) = pointer else {
        return false;
    };
    app.hovered_city
        .and_then(|layer| app.popup_rects.get(&(Panel::Promo, layer)))
        .map(|card: &Rect| card.contains(pointer))
        .unwrap_or(false)
}

pub fn render_promo_panel(ui: &mut egui::Ui, app: &mut MapsApp) {
    ui.horizontal(|ui| {
        ui.heading("Where we ride");
        city_picker(ui, app);
    });
    ui.label(format!(
        "Now serving {} cities across Nigeria.",
        app.page.promo_map.cities().len()
    ));

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
    let Some(view) = app.scene(Panel::Promo).view().copied() else {
        return;
    };
    let projection = MapProjection::new(&view, response.rect);
    paint_scene(&painter, &projection, app.scene(Panel::Promo));

    let promo = &app.page.promo_map;
    let hit = response.hover_pos().and_then(|pos| {
        hit_test(promo.surface(), &projection, pos, |layer| {
            promo.city_at(layer).is_some()
        })
    });
    if !pointer_on_card(app, ui.ctx().pointer_hover_pos()) {
        app.update_hover(hit);
    }

    if response.clicked() {
        if let Some(layer) = hit {
            app.open_popup(Panel::Promo, layer);
        }
    }

    render_popups(ui.ctx(), app, Panel::Promo, &projection);
}

#[cfg(test)]
mod tests {
    use map_core::geo::Location;

    use super::*;

    #[test]
    fn hints_follow_the_route_state() {
        let here = Location::new(1.0, 2.0);
        assert!(route_hint(RouteState::NoSelection).contains("pickup"));
        assert!(route_hint(RouteState::PickupSet { pickup: here }).contains("destination"));
        assert!(route_hint(RouteState::RouteComplete {
            pickup: here,
            destination: here
        })
        .contains("new route"));
    }
}
