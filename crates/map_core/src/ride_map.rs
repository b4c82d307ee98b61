//! "Book a ride" map: user position, a simulated fleet around it, click-driven
//! pickup/destination selection and a toy fare quote.
//!
//! The widget is single-threaded and event driven. Hosts feed it input through
//! [`RideMapWidget::handle_event`] and wall-clock time through
//! [`RideMapWidget::advance_to`]; periodic work (fleet movement, clearing the
//! "moving" flag) lives on the widget's own [`TimerQueue`].

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::RideMapConfig;
use crate::fleet::{self, Driver, DriverId};
use crate::geo::Location;
use crate::geolocation::{GeolocationError, LocationSource};
use crate::movement::movement_tick;
use crate::notify::NotificationCenter;
use crate::pricing::RouteEstimate;
use crate::route::{RouteSelection, RouteState, RouteTransition};
use crate::surface::{
    Color, InteractionOptions, LayerId, MapEvent, MapSurface, MapView, MarkerKind, PathStyle,
    PointMarker, PopupAction, PopupContent,
};
use crate::timers::{Millis, TimerQueue};

pub const PICKUP_SET_MESSAGE: &str = "📍 Pickup location set! Now click destination.";
pub const DESTINATION_SET_MESSAGE: &str = "🎯 Destination set! Calculating route...";
pub const RECENTERED_MESSAGE: &str = "📍 Centered on your location";

pub fn estimate_message(estimate: &RouteEstimate) -> String {
    format!(
        "💰 Estimated fare: ${:.2} | Distance: {:.1} km",
        estimate.fare, estimate.distance_km
    )
}

pub fn driver_selected_message(driver: &Driver) -> String {
    format!("🚗 {} selected! Arriving in 3 minutes.", driver.name)
}

/// Dashed blue straight line between pickup and destination.
pub const ROUTE_STYLE: PathStyle = PathStyle {
    color: Color::ROUTE_BLUE,
    weight: 5.0,
    opacity: 0.7,
    dash: Some((10.0, 10.0)),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RideTimer {
    MovementTick,
    ClearMoving(DriverId),
}

pub struct RideMapWidget<S: MapSurface> {
    surface: S,
    config: RideMapConfig,
    notifications: NotificationCenter,
    rng: StdRng,
    timers: TimerQueue<RideTimer>,
    tile_layer: Option<LayerId>,
    user_location: Option<Location>,
    user_marker: Option<LayerId>,
    drivers: Vec<Driver>,
    driver_markers: HashMap<DriverId, LayerId>,
    last_moved_at: HashMap<DriverId, Millis>,
    movement_armed: bool,
    selection: RouteSelection,
    pickup_marker: Option<LayerId>,
    destination_marker: Option<LayerId>,
    route_path: Option<LayerId>,
    estimate: Option<RouteEstimate>,
}

impl<S: MapSurface> RideMapWidget<S> {
    pub fn new(surface: S, config: RideMapConfig, notifications: NotificationCenter) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            surface,
            config,
            notifications,
            rng,
            timers: TimerQueue::default(),
            tile_layer: None,
            user_location: None,
            user_marker: None,
            drivers: Vec::new(),
            driver_markers: HashMap::new(),
            last_moved_at: HashMap::new(),
            movement_armed: false,
            selection: RouteSelection::new(),
            pickup_marker: None,
            destination_marker: None,
            route_path: None,
            estimate: None,
        }
    }

    /// Render the map, ask `source` for the user's position and populate the fleet.
    pub fn initialize(&mut self, source: &mut dyn LocationSource) {
        self.render_map();
        let position = source.request_current_position();
        self.resolve_location(position);
    }

    /// Create the view at the default position and add the tile background.
    pub fn render_map(&mut self) {
        self.surface.create_view(MapView {
            center: self.config.default_location,
            zoom: self.config.initial_zoom,
            interactions: InteractionOptions::interactive(),
        });
        if let Some(previous) = self.tile_layer.take() {
            self.surface.remove_layer(previous);
        }
        self.tile_layer = Some(self.surface.add_tile_layer(self.config.tiles.clone()));
        tracing::info!("ride map initialized");
    }

    /// Continuation of the position request. Denial or unavailability is not
    /// an error for the widget: it substitutes the configured default.
    pub fn resolve_location(&mut self, position: Result<Location, GeolocationError>) {
        let location = match position {
            Ok(location) => {
                self.surface.set_view(location, self.config.located_zoom);
                location
            }
            Err(reason) => {
                tracing::info!(%reason, "location not available, using default location");
                self.config.default_location
            }
        };
        self.user_location = Some(location);
        self.place_user_marker(location);
        let count = self.config.fleet.size;
        self.generate_fleet(location, count);
    }

    fn place_user_marker(&mut self, location: Location) {
        if let Some(previous) = self.user_marker.take() {
            self.surface.remove_layer(previous);
        }
        let marker = self
            .surface
            .add_marker(PointMarker::new(location, MarkerKind::User));
        self.surface
            .bind_popup(marker, PopupContent::text("Your Location"));
        self.surface.open_popup(marker);
        self.user_marker = Some(marker);
    }

    /// Replace the fleet with `count` drivers around `origin`, one marker each,
    /// and make sure the movement simulation is running.
    pub fn generate_fleet(&mut self, origin: Location, count: usize) -> &[Driver] {
        self.remove_driver_markers();
        self.drivers = fleet::generate_fleet(origin, count, &self.config.fleet, &mut self.rng);
        for driver in &self.drivers {
            let marker = self
                .surface
                .add_marker(PointMarker::new(driver.location, MarkerKind::Driver));
            self.surface
                .bind_popup(marker, PopupContent::Driver(driver.popup_card()));
            self.driver_markers.insert(driver.id, marker);
        }
        tracing::debug!(count, "fleet generated");
        if !self.movement_armed {
            self.timers
                .schedule_in(self.config.movement.interval_ms, RideTimer::MovementTick);
            self.movement_armed = true;
        }
        &self.drivers
    }

    fn remove_driver_markers(&mut self) {
        for (_, marker) in self.driver_markers.drain() {
            self.surface.remove_layer(marker);
        }
        self.last_moved_at.clear();
    }

    /// One movement step over the fleet. Moved markers follow their driver and
    /// show the moving state until one interval has passed without another move.
    pub fn simulate_movement_tick(&mut self) -> Vec<DriverId> {
        let moved = movement_tick(&mut self.drivers, &self.config.movement, &mut self.rng);
        let now = self.timers.now();
        for id in &moved {
            let Some(driver) = self.drivers.iter().find(|driver| driver.id == *id) else {
                continue;
            };
            if let Some(marker) = self.driver_markers.get(id) {
                self.surface.set_marker_position(*marker, driver.location);
                self.surface.set_marker_moving(*marker, true);
            }
            self.last_moved_at.insert(*id, now);
            self.timers
                .schedule_in(self.config.movement.interval_ms, RideTimer::ClearMoving(*id));
        }
        tracing::debug!(moved = moved.len(), at_ms = now, "movement tick");
        moved
    }

    fn clear_moving(&mut self, id: DriverId) {
        let Some(moved_at) = self.last_moved_at.get(&id).copied() else {
            return;
        };
        if self.timers.now() < moved_at + self.config.movement.interval_ms {
            return;
        }
        self.last_moved_at.remove(&id);
        if let Some(driver) = self.drivers.iter_mut().find(|driver| driver.id == id) {
            driver.moving = false;
        }
        if let Some(marker) = self.driver_markers.get(&id) {
            self.surface.set_marker_moving(*marker, false);
        }
    }

    /// Fire every timer due at or before `now_ms`.
    pub fn advance_to(&mut self, now_ms: Millis) {
        while let Some(timer) = self.timers.pop_due(now_ms) {
            match timer.kind {
                RideTimer::MovementTick => {
                    self.simulate_movement_tick();
                    self.timers
                        .schedule_in(self.config.movement.interval_ms, RideTimer::MovementTick);
                }
                RideTimer::ClearMoving(id) => self.clear_moving(id),
            }
        }
        self.timers.settle(now_ms);
    }

    pub fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::Click(location) => {
                self.handle_map_click(location);
            }
            MapEvent::PopupAction(PopupAction::SelectDriver(id)) => {
                self.select_driver(id);
            }
            other => tracing::debug!(?other, "ride map ignores event"),
        }
    }

    pub fn handle_map_click(&mut self, location: Location) -> RouteTransition {
        let transition = self.selection.apply_click(location);
        match transition {
            RouteTransition::PickupSelected { pickup } => self.set_pickup(pickup),
            RouteTransition::DestinationSelected {
                pickup,
                destination,
            } => {
                self.set_destination(destination);
                self.compute_route(pickup, destination);
            }
            RouteTransition::Restarted { pickup, .. } => {
                self.clear_route();
                self.set_pickup(pickup);
            }
        }
        transition
    }

    fn set_pickup(&mut self, location: Location) {
        if let Some(previous) = self.pickup_marker.take() {
            self.surface.remove_layer(previous);
        }
        let marker = self
            .surface
            .add_marker(PointMarker::new(location, MarkerKind::Pickup));
        self.surface
            .bind_popup(marker, PopupContent::text("Pickup Location"));
        self.surface.open_popup(marker);
        self.pickup_marker = Some(marker);
        self.notifications.success(PICKUP_SET_MESSAGE);
    }

    fn set_destination(&mut self, location: Location) {
        if let Some(previous) = self.destination_marker.take() {
            self.surface.remove_layer(previous);
        }
        let marker = self
            .surface
            .add_marker(PointMarker::new(location, MarkerKind::Destination));
        self.surface
            .bind_popup(marker, PopupContent::text("Destination"));
        self.surface.open_popup(marker);
        self.destination_marker = Some(marker);
        self.notifications.success(DESTINATION_SET_MESSAGE);
    }

    /// Draw the straight-line path and quote distance and fare for it.
    pub fn compute_route(&mut self, pickup: Location, destination: Location) -> RouteEstimate {
        if let Some(previous) = self.route_path.take() {
            self.surface.remove_layer(previous);
        }
        self.route_path = Some(
            self.surface
                .add_polyline(vec![pickup, destination], ROUTE_STYLE),
        );
        let estimate = RouteEstimate::between(pickup, destination, &self.config.pricing);
        tracing::debug!(
            distance_km = estimate.distance_km,
            fare = estimate.fare,
            "route estimated"
        );
        self.estimate = Some(estimate);
        self.notifications.success(estimate_message(&estimate));
        estimate
    }

    fn clear_route(&mut self) {
        for layer in [
            self.route_path.take(),
            self.pickup_marker.take(),
            self.destination_marker.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.surface.remove_layer(layer);
        }
        self.estimate = None;
    }

    /// Announce the chosen driver. Unknown ids are ignored.
    pub fn select_driver(&mut self, id: DriverId) -> Option<&Driver> {
        let driver = self.drivers.iter().find(|driver| driver.id == id)?;
        self.notifications.success(driver_selected_message(driver));
        Some(driver)
    }

    /// Re-center on the captured user position; does nothing before one is known.
    pub fn recenter_on_user(&mut self) -> bool {
        let Some(location) = self.user_location else {
            return false;
        };
        self.surface.set_view(location, self.config.located_zoom);
        self.notifications.success(RECENTERED_MESSAGE);
        true
    }

    /// Remove everything this widget drew and stop its timers.
    pub fn shutdown(&mut self) {
        self.timers.clear();
        self.movement_armed = false;
        self.clear_route();
        self.selection.clear();
        self.remove_driver_markers();
        self.drivers.clear();
        for layer in [self.user_marker.take(), self.tile_layer.take()]
            .into_iter()
            .flatten()
        {
            self.surface.remove_layer(layer);
        }
        tracing::debug!("ride map shut down");
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for host-side surface behavior such as opening a
    /// clicked marker's popup or panning an interactive view.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &RideMapConfig {
        &self.config
    }

    pub fn now_ms(&self) -> Millis {
        self.timers.now()
    }

    pub fn user_location(&self) -> Option<Location> {
        self.user_location
    }

    pub fn user_marker(&self) -> Option<LayerId> {
        self.user_marker
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.iter().find(|driver| driver.id == id)
    }

    pub fn driver_marker(&self, id: DriverId) -> Option<LayerId> {
        self.driver_markers.get(&id).copied()
    }

    pub fn route_state(&self) -> RouteState {
        self.selection.state()
    }

    pub fn route_path(&self) -> Option<LayerId> {
        self.route_path
    }

    pub fn pickup_marker(&self) -> Option<LayerId> {
        self.pickup_marker
    }

    pub fn destination_marker(&self) -> Option<LayerId> {
        self.destination_marker
    }

    pub fn estimate(&self) -> Option<RouteEstimate> {
        self.estimate
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }
}
