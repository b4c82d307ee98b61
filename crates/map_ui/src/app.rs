use std::collections::HashMap;
use std::time::Instant;

use eframe::egui;
use map_core::config::WidgetsConfig;
use map_core::geolocation::{DeniedLocationSource, FixedLocationSource, LocationSource};
use map_core::notify::NotificationCenter;
use map_core::page::{LandingPage, PageServices};
use map_core::scene::Scene;
use map_core::surface::{LayerId, MapEvent, MapSurface, PopupAction};
use map_core::timers::Millis;

mod host;

pub use host::{AlertQueue, PendingNavigation, ToastQueue};

/// Which widget an input or popup belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Ride,
    Promo,
}

pub struct MapsApp {
    pub page: LandingPage<Scene>,
    pub toasts: ToastQueue,
    pub alerts: AlertQueue,
    pub navigation: PendingNavigation,
    pub started_at: Instant,
    /// City marker currently under the pointer on the promo map.
    pub hovered_city: Option<LayerId>,
    /// Screen rects of last frame's popup cards, per panel and layer.
    pub popup_rects: HashMap<(Panel, LayerId), egui::Rect>,
    pub selected_city: Option<&'static str>,
}

impl MapsApp {
    pub fn new(config: &WidgetsConfig) -> Self {
        let toasts = ToastQueue::default();
        let alerts = AlertQueue::default();
        let navigation = PendingNavigation::default();

        let mut notifications = NotificationCenter::new(Box::new(alerts.clone()));
        if config.notifications.toasts_enabled {
            notifications = notifications.with_notifier(Box::new(toasts.clone()));
        }

        let mut location: Box<dyn LocationSource> = match config.user_location {
            Some(here) => Box::new(FixedLocationSource(here)),
            None => Box::new(DeniedLocationSource),
        };

        let page = LandingPage::mount(
            config,
            Scene::new(),
            Scene::new(),
            PageServices {
                notifications,
                navigator: Box::new(navigation.clone()),
                location: location.as_mut(),
            },
        );

        Self {
            page,
            toasts,
            alerts,
            navigation,
            started_at: Instant::now(),
            hovered_city: None,
            popup_rects: HashMap::new(),
            selected_city: None,
        }
    }

    pub fn elapsed_ms(&self) -> Millis {
        self.started_at.elapsed().as_millis() as Millis
    }

    /// Bring both widgets up to wall-clock time.
    pub fn tick(&mut self) {
        let now = self.elapsed_ms();
        self.page.advance_to(now);
    }

    pub fn dispatch(&mut self, panel: Panel, event: MapEvent) {
        match panel {
            Panel::Ride => self.page.ride_map.handle_event(event),
            Panel::Promo => self.page.promo_map.handle_event(event),
        }
    }

    pub fn dispatch_popup_action(&mut self, panel: Panel, action: PopupAction) {
        self.dispatch(panel, MapEvent::PopupAction(action));
    }

    /// Leaflet-style marker click: show this marker's popup, close the rest.
    pub fn open_popup(&mut self, panel: Panel, layer: LayerId) {
        let scene = self.scene_mut(panel);
        scene.close_all_popups();
        scene.open_popup(layer);
    }

    pub fn close_popup(&mut self, panel: Panel, layer: LayerId) {
        self.scene_mut(panel).close_popup(layer);
    }

    /// Move the promo hover to `hit`, sending leave/enter as it changes.
    pub fn update_hover(&mut self, hit: Option<LayerId>) {
        if self.hovered_city == hit {
            return;
        }
        if let Some(previous) = self.hovered_city.take() {
            self.page.promo_map.handle_event(MapEvent::HoverLeave(previous));
        }
        if let Some(next) = hit {
            self.page.promo_map.handle_event(MapEvent::HoverEnter(next));
        }
        self.hovered_city = hit;
    }

    pub fn highlight_city(&mut self, name: &'static str) {
        if self.page.promo_map.highlight_city(name) {
            self.selected_city = Some(name);
        }
    }

    pub fn scene(&self, panel: Panel) -> &Scene {
        match panel {
            Panel::Ride => self.page.ride_map.surface(),
            Panel::Promo => self.page.promo_map.surface(),
        }
    }

    fn scene_mut(&mut self, panel: Panel) -> &mut Scene {
        match panel {
            Panel::Ride => self.page.ride_map.surface_mut(),
            Panel::Promo => self.page.promo_map.surface_mut(),
        }
    }

    pub fn open_pending_links(&self, ctx: &egui::Context) {
        for target in self.navigation.take() {
            ctx.open_url(egui::OpenUrl::same_tab(target));
        }
    }
}

impl Drop for MapsApp {
    fn drop(&mut self) {
        self.page.shutdown();
    }
}
