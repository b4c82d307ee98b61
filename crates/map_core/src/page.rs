//! Page root: owns both widgets and mounts them together.

use crate::config::WidgetsConfig;
use crate::geolocation::LocationSource;
use crate::navigation::Navigator;
use crate::notify::NotificationCenter;
use crate::promo_map::PromoMapWidget;
use crate::ride_map::RideMapWidget;
use crate::surface::MapSurface;
use crate::timers::Millis;

/// Collaborators the page hands to its widgets at mount time.
pub struct PageServices<'a> {
    pub notifications: NotificationCenter,
    pub navigator: Box<dyn Navigator>,
    pub location: &'a mut dyn LocationSource,
}

pub struct LandingPage<S: MapSurface> {
    pub ride_map: RideMapWidget<S>,
    pub promo_map: PromoMapWidget<S>,
}

impl<S: MapSurface> LandingPage<S> {
    /// Build and initialize both widgets. They share nothing but the clock
    /// the host drives them with.
    pub fn mount(
        config: &WidgetsConfig,
        ride_surface: S,
        promo_surface: S,
        services: PageServices<'_>,
    ) -> Self {
        let mut ride_map = RideMapWidget::new(
            ride_surface,
            config.ride_map.clone(),
            services.notifications,
        );
        ride_map.initialize(services.location);

        let mut promo_map =
            PromoMapWidget::new(promo_surface, config.promo_map.clone(), services.navigator);
        promo_map.initialize();

        Self {
            ride_map,
            promo_map,
        }
    }

    pub fn advance_to(&mut self, now_ms: Millis) {
        self.ride_map.advance_to(now_ms);
        self.promo_map.advance_to(now_ms);
    }

    pub fn shutdown(&mut self) {
        self.ride_map.shutdown();
        self.promo_map.shutdown();
    }
}
