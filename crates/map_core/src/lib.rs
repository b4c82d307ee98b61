pub mod cities;
pub mod config;
pub mod error;
pub mod fleet;
pub mod geo;
pub mod geolocation;
pub mod movement;
pub mod navigation;
pub mod notify;
pub mod page;
pub mod pricing;
pub mod promo_map;
pub mod pulse;
pub mod ride_map;
pub mod route;
pub mod scene;
pub mod surface;
pub mod timers;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
