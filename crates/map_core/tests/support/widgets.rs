#![allow(dead_code)]

use map_core::config::{PromoMapConfig, RideMapConfig, WidgetsConfig};
use map_core::geo::Location;
use map_core::geolocation::{DeniedLocationSource, FixedLocationSource, LocationSource};
use map_core::movement::MovementConfig;
use map_core::notify::NotificationCenter;
use map_core::page::{LandingPage, PageServices};
use map_core::promo_map::PromoMapWidget;
use map_core::ride_map::RideMapWidget;
use map_core::scene::Scene;
use map_core::test_helpers::{
    recording_notifications, RecordingAlert, RecordingNavigator, RecordingNotifier, TEST_SEED,
};

/// Builder for reproducible ride maps on an in-memory scene.
#[derive(Clone, Debug)]
pub struct RideMapBuilder {
    config: RideMapConfig,
    user_location: Option<Location>,
}

impl Default for RideMapBuilder {
    fn default() -> Self {
        Self {
            config: RideMapConfig::default().with_seed(TEST_SEED),
            user_location: None,
        }
    }
}

impl RideMapBuilder {
    pub fn located_at(mut self, location: Location) -> Self {
        self.user_location = Some(location);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_movement(mut self, movement: MovementConfig) -> Self {
        self.config.movement = movement;
        self
    }

    pub fn config(&self) -> &RideMapConfig {
        &self.config
    }

    /// Initialized widget plus the handle recording its notifications.
    pub fn build(self) -> (RideMapWidget<Scene>, RecordingNotifier) {
        let (center, notifier) = recording_notifications();
        let mut widget = RideMapWidget::new(Scene::new(), self.config, center);
        match self.user_location {
            Some(location) => widget.initialize(&mut FixedLocationSource(location)),
            None => widget.initialize(&mut DeniedLocationSource),
        }
        (widget, notifier)
    }

    /// Initialized widget without a notifier, so messages go to the alert fallback.
    pub fn build_with_alerts(self) -> (RideMapWidget<Scene>, RecordingAlert) {
        let alerts = RecordingAlert::default();
        let mut widget = RideMapWidget::new(
            Scene::new(),
            self.config,
            NotificationCenter::new(Box::new(alerts.clone())),
        );
        widget.initialize(&mut DeniedLocationSource);
        (widget, alerts)
    }
}

pub fn promo_map() -> (PromoMapWidget<Scene>, RecordingNavigator) {
    let navigator = RecordingNavigator::default();
    let mut widget = PromoMapWidget::new(
        Scene::new(),
        PromoMapConfig::default(),
        Box::new(navigator.clone()),
    );
    widget.initialize();
    (widget, navigator)
}

pub struct MountedPage {
    pub page: LandingPage<Scene>,
    pub notifier: RecordingNotifier,
    pub navigator: RecordingNavigator,
}

pub fn mount_page(config: &WidgetsConfig, location: &mut dyn LocationSource) -> MountedPage {
    let (notifications, notifier) = recording_notifications();
    let navigator = RecordingNavigator::default();
    let page = LandingPage::mount(
        config,
        Scene::new(),
        Scene::new(),
        PageServices {
            notifications,
            navigator: Box::new(navigator.clone()),
            location,
        },
    );
    MountedPage {
        page,
        notifier,
        navigator,
    }
}
