//! Static promotional map of served cities.
//!
//! The view is locked (no pan or zoom). Every city gets a gold circle marker,
//! a pulse ring animated on the widget's timer queue, and a popup linking to
//! the signup page. Hovering a marker previews its popup in the highlight
//! color; [`PromoMapWidget::highlight_city`] makes that permanent.

use crate::cities::{City, CITIES};
use crate::config::PromoMapConfig;
use crate::navigation::Navigator;
use crate::pulse::{CancellationToken, PulseAnimation};
use crate::surface::{
    CircleStyle, Color, InteractionOptions, LayerId, MapEvent, MapSurface, MapView,
    PolygonStyle, PopupAction, PopupContent,
};
use crate::timers::{Millis, TimerQueue};

pub const MARKER_COLOR: Color = Color::GOLD;
pub const HIGHLIGHT_COLOR: Color = Color::TEAL;

pub const OUTLINE_STYLE: PolygonStyle = PolygonStyle {
    stroke: None,
    fill_color: Color::OUTLINE_GREEN,
    fill_opacity: 0.3,
    weight: 2.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromoTimer {
    /// Frames belong to one ring; a restarted pulse leaves the old chain stale.
    PulseFrame { marker: LayerId, ring: LayerId },
}

#[derive(Debug)]
struct CityMarker {
    city: City,
    marker: LayerId,
    style: CircleStyle,
    pulse: Option<PulseAnimation>,
}

pub struct PromoMapWidget<S: MapSurface> {
    surface: S,
    config: PromoMapConfig,
    navigator: Box<dyn Navigator>,
    timers: TimerQueue<PromoTimer>,
    cities: Vec<City>,
    tile_layer: Option<LayerId>,
    outline: Option<LayerId>,
    markers: Vec<CityMarker>,
}

impl<S: MapSurface> PromoMapWidget<S> {
    pub fn new(surface: S, config: PromoMapConfig, navigator: Box<dyn Navigator>) -> Self {
        Self::with_cities(surface, config, navigator, CITIES.to_vec())
    }

    pub fn with_cities(
        surface: S,
        config: PromoMapConfig,
        navigator: Box<dyn Navigator>,
        cities: Vec<City>,
    ) -> Self {
        Self {
            surface,
            config,
            navigator,
            timers: TimerQueue::default(),
            cities,
            tile_layer: None,
            outline: None,
            markers: Vec::new(),
        }
    }

    pub fn initialize(&mut self) {
        self.surface.create_view(MapView {
            center: self.config.center,
            zoom: self.config.zoom,
            interactions: InteractionOptions::locked(),
        });
        self.tile_layer = Some(self.surface.add_tile_layer(self.config.tiles.clone()));
        self.outline = Some(
            self.surface
                .add_polygon(self.config.outline.clone(), OUTLINE_STYLE),
        );
        self.add_city_markers();
        tracing::info!(cities = self.cities.len(), "promo map initialized");
    }

    fn base_style(&self) -> CircleStyle {
        CircleStyle {
            color: MARKER_COLOR,
            fill_color: MARKER_COLOR,
            fill_opacity: 0.8,
            radius: self.config.marker_radius,
            weight: 2.0,
        }
    }

    fn add_city_markers(&mut self) {
        let style = self.base_style();
        for index in 0..self.cities.len() {
            let city = self.cities[index];
            let marker = self.surface.add_circle_marker(city.location, style);
            self.markers.push(CityMarker {
                city,
                marker,
                style,
                pulse: None,
            });
            self.render_pulse(marker);
            self.surface
                .bind_popup(marker, PopupContent::City(city.popup_card()));
        }
    }

    /// Start (or restart) the pulse ring around `marker`. Returns the handle
    /// that stops it, or `None` if `marker` is not one of this map's cities.
    pub fn render_pulse(&mut self, marker: LayerId) -> Option<CancellationToken> {
        let pulse_config = self.config.pulse;
        let index = self.marker_index(marker)?;
        if let Some(previous) = self.markers[index].pulse.take() {
            previous.handle().cancel();
            self.surface.remove_layer(previous.ring());
        }
        let center = self.markers[index].city.location;
        let ring = self
            .surface
            .add_circle_marker(center, pulse_config.style_at(1.0, MARKER_COLOR));
        let mut pulse = PulseAnimation::new(ring, MARKER_COLOR);
        let handle = pulse.handle();
        if let Some(style) = pulse.advance(&pulse_config) {
            self.surface.set_circle_style(ring, style);
        }
        self.markers[index].pulse = Some(pulse);
        self.timers.schedule_in(
            pulse_config.frame_interval_ms,
            PromoTimer::PulseFrame { marker, ring },
        );
        Some(handle)
    }

    fn on_pulse_frame(&mut self, marker: LayerId, ring: LayerId) {
        let pulse_config = self.config.pulse;
        let Some(index) = self.marker_index(marker) else {
            return;
        };
        let Some(pulse) = self.markers[index].pulse.as_mut() else {
            return;
        };
        if pulse.ring() != ring {
            tracing::trace!(?ring, "dropping frame for a replaced pulse");
            return;
        }
        match pulse.advance(&pulse_config) {
            Some(style) => {
                self.surface.set_circle_style(ring, style);
                self.timers.schedule_in(
                    pulse_config.frame_interval_ms,
                    PromoTimer::PulseFrame { marker, ring },
                );
            }
            None => {
                self.surface.remove_layer(pulse.ring());
                self.markers[index].pulse = None;
                tracing::debug!(city = self.markers[index].city.name, "pulse stopped");
            }
        }
    }

    /// Fire every animation frame due at or before `now_ms`.
    pub fn advance_to(&mut self, now_ms: Millis) {
        while let Some(timer) = self.timers.pop_due(now_ms) {
            match timer.kind {
                PromoTimer::PulseFrame { marker, ring } => self.on_pulse_frame(marker, ring),
            }
        }
        self.timers.settle(now_ms);
    }

    pub fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::HoverEnter(marker) => self.hover_enter(marker),
            MapEvent::HoverLeave(marker) => self.hover_leave(marker),
            MapEvent::PopupAction(PopupAction::Navigate(target)) => {
                self.navigator.navigate(&target);
            }
            other => tracing::debug!(?other, "promo map ignores event"),
        }
    }

    pub fn hover_enter(&mut self, marker: LayerId) {
        let Some(index) = self.marker_index(marker) else {
            return;
        };
        self.surface.open_popup(marker);
        self.recolor(index, HIGHLIGHT_COLOR);
    }

    pub fn hover_leave(&mut self, marker: LayerId) {
        let Some(index) = self.marker_index(marker) else {
            return;
        };
        self.surface.close_popup(marker);
        self.recolor(index, MARKER_COLOR);
    }

    fn recolor(&mut self, index: usize, color: Color) {
        let entry = &mut self.markers[index];
        entry.style.color = color;
        entry.style.fill_color = color;
        self.surface.set_circle_style(entry.marker, entry.style);
    }

    /// Enlarge and recolor the named city's marker and open its popup.
    /// Unknown names are ignored.
    pub fn highlight_city(&mut self, name: &str) -> bool {
        let radius = self.config.highlighted_radius;
        let Some(index) = self.named_index(name) else {
            return false;
        };
        let entry = &mut self.markers[index];
        entry.style.color = HIGHLIGHT_COLOR;
        entry.style.fill_color = HIGHLIGHT_COLOR;
        entry.style.radius = radius;
        self.surface.set_circle_style(entry.marker, entry.style);
        self.surface.open_popup(entry.marker);
        true
    }

    /// Take a city off the map; its pulse stops with it.
    pub fn remove_city(&mut self, name: &str) -> bool {
        let Some(index) = self.named_index(name) else {
            return false;
        };
        let entry = self.markers.remove(index);
        if let Some(pulse) = entry.pulse {
            pulse.handle().cancel();
            self.surface.remove_layer(pulse.ring());
        }
        self.surface.remove_layer(entry.marker);
        true
    }

    /// Stop every pulse and remove everything this widget drew.
    pub fn shutdown(&mut self) {
        for entry in self.markers.drain(..) {
            if let Some(pulse) = entry.pulse {
                pulse.handle().cancel();
                self.surface.remove_layer(pulse.ring());
            }
            self.surface.remove_layer(entry.marker);
        }
        for layer in [self.outline.take(), self.tile_layer.take()]
            .into_iter()
            .flatten()
        {
            self.surface.remove_layer(layer);
        }
        self.timers.clear();
        tracing::debug!("promo map shut down");
    }

    fn marker_index(&self, marker: LayerId) -> Option<usize> {
        self.markers.iter().position(|entry| entry.marker == marker)
    }

    /// Exact, case-sensitive match on the city name.
    fn named_index(&self, name: &str) -> Option<usize> {
        self.markers.iter().position(|entry| entry.city.name == name)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for host-side surface behavior such as opening a
    /// clicked marker's popup or panning an interactive view.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city_marker(&self, name: &str) -> Option<LayerId> {
        self.named_index(name).map(|index| self.markers[index].marker)
    }

    /// City drawn by `marker`, if any.
    pub fn city_at(&self, marker: LayerId) -> Option<&City> {
        self.marker_index(marker).map(|index| &self.markers[index].city)
    }

    pub fn city_markers(&self) -> impl Iterator<Item = (&City, LayerId)> {
        self.markers.iter().map(|entry| (&entry.city, entry.marker))
    }

    pub fn pulse_ring(&self, name: &str) -> Option<LayerId> {
        let index = self.named_index(name)?;
        self.markers[index].pulse.as_ref().map(PulseAnimation::ring)
    }

    pub fn pulse_handle(&self, name: &str) -> Option<CancellationToken> {
        let index = self.named_index(name)?;
        self.markers[index].pulse.as_ref().map(PulseAnimation::handle)
    }

    pub fn now_ms(&self) -> Millis {
        self.timers.now()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::LogNavigator;
    use crate::scene::{LayerShape, Scene};

    fn promo() -> PromoMapWidget<Scene> {
        let mut map =
            PromoMapWidget::new(Scene::new(), PromoMapConfig::default(), Box::new(LogNavigator));
        map.initialize();
        map
    }

    #[test]
    fn view_is_locked_on_nigeria() {
        let map = promo();
        let view = map.surface().view().expect("view");
        assert_eq!(view.zoom, 6);
        assert!(!view.interactions.allows_navigation());
        assert!(!view.interactions.zoom_control);
    }

    #[test]
    fn one_marker_and_one_ring_per_city() {
        let map = promo();
        let circles = map
            .surface()
            .count_where(|shape| matches!(shape, LayerShape::Circle { .. }));
        assert_eq!(circles, 24);
        assert_eq!(
            map.surface()
                .count_where(|shape| matches!(shape, LayerShape::Polygon { .. })),
            1
        );
    }

    #[test]
    fn unknown_marker_has_no_pulse_to_render() {
        let mut map = promo();
        assert!(map.render_pulse(LayerId(9_999)).is_none());
    }

    #[test]
    fn city_lookups_are_case_sensitive() {
        let mut map = promo();
        assert!(map.city_marker("Enugu").is_some());
        assert!(map.city_marker("enugu").is_none());
        assert!(!map.highlight_city("lagos"));
        assert!(!map.remove_city("Atlantis"));
        assert_eq!(map.city_markers().count(), CITIES.len());
    }

    #[test]
    fn pulse_ring_starts_one_frame_in() {
        let map = promo();
        let ring = map.pulse_ring("Kano").expect("ring");
        let (_, style) = map.surface().circle(ring).expect("circle");
        assert!((style.radius - 8.4).abs() < 1e-9);
        assert!((style.fill_opacity - 0.3 / 1.05).abs() < 1e-9);
    }

    #[test]
    fn restarted_pulse_advances_one_step_per_frame() {
        let mut map = promo();
        let marker = map.city_marker("Lagos").expect("marker");
        map.render_pulse(marker).expect("restart");
        map.render_pulse(marker).expect("restart again");

        for (now, radius) in [(16, 8.8), (32, 9.2), (48, 9.6)] {
            map.advance_to(now);
            let ring = map.pulse_ring("Lagos").expect("ring");
            let (_, style) = map.surface().circle(ring).expect("circle");
            assert!(
                (style.radius - radius).abs() < 1e-9,
                "at {now}ms radius was {}",
                style.radius
            );
        }
    }
}
