//! Widget configuration.
//!
//! Every field defaults to the values the marketing pages ship with, and
//! `#[serde(default)]` lets a config file override only what it names. Files
//! are JSON; a missing file means "use the defaults".

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cities::{NIGERIA_CENTER, NIGERIA_OUTLINE};
use crate::error::ConfigError;
use crate::fleet::FleetConfig;
use crate::geo::Location;
use crate::movement::MovementConfig;
use crate::pricing::PricingConfig;
use crate::pulse::PulseConfig;
use crate::surface::TileLayer;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "ride_maps.json";

/// Fallback position when geolocation is denied or unavailable: New York.
pub const DEFAULT_LOCATION: Location = Location::new(40.7128, -74.0060);

/// Deepest zoom level any tile provider serves; hosts project with `1 << zoom`.
pub const MAX_ZOOM: u8 = 20;

pub fn openstreetmap_tiles() -> TileLayer {
    TileLayer {
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        attribution: "© OpenStreetMap contributors".to_string(),
        subdomains: None,
        min_zoom: None,
        max_zoom: 18,
    }
}

pub fn carto_dark_tiles() -> TileLayer {
    TileLayer {
        url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png".to_string(),
        attribution: "©OpenStreetMap, ©CartoDB".to_string(),
        subdomains: Some("abcd".to_string()),
        min_zoom: Some(5),
        max_zoom: 10,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideMapConfig {
    pub default_location: Location,
    /// Zoom of the map before the user's position is known.
    pub initial_zoom: u8,
    /// Zoom used once centered on the user.
    pub located_zoom: u8,
    pub tiles: TileLayer,
    pub fleet: FleetConfig,
    pub movement: MovementConfig,
    pub pricing: PricingConfig,
    /// RNG seed for fleet placement and movement; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RideMapConfig {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION,
            initial_zoom: 13,
            located_zoom: 15,
            tiles: openstreetmap_tiles(),
            fleet: FleetConfig::default(),
            movement: MovementConfig::default(),
            pricing: PricingConfig::default(),
            seed: None,
        }
    }
}

impl RideMapConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fleet(mut self, fleet: FleetConfig) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn with_movement(mut self, movement: MovementConfig) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_default_location(mut self, location: Location) -> Self {
        self.default_location = location;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_location.is_finite() {
            return Err(invalid("ride_map.default_location must be finite"));
        }
        validate_zoom("ride_map.initial_zoom", self.initial_zoom)?;
        validate_zoom("ride_map.located_zoom", self.located_zoom)?;
        validate_tiles("ride_map.tiles", &self.tiles)?;
        let fleet = &self.fleet;
        if !(fleet.spread_deg >= 0.0 && fleet.spread_deg.is_finite()) {
            return Err(invalid("ride_map.fleet.spread_deg must be a non-negative number"));
        }
        let ratings_ordered = 0.0 <= fleet.rating_min
            && fleet.rating_min <= fleet.rating_max
            && fleet.rating_max <= 5.0;
        if !ratings_ordered {
            return Err(invalid(
                "ride_map.fleet rating bounds must satisfy 0 <= rating_min <= rating_max <= 5",
            ));
        }
        let movement = &self.movement;
        if movement.interval_ms == 0 {
            return Err(invalid("ride_map.movement.interval_ms must be positive"));
        }
        if !(0.0..=1.0).contains(&movement.move_probability) {
            return Err(invalid("ride_map.movement.move_probability must be within [0, 1]"));
        }
        if !(movement.step_deg >= 0.0 && movement.step_deg.is_finite()) {
            return Err(invalid("ride_map.movement.step_deg must be a non-negative number"));
        }
        if self.pricing.base_fare < 0.0 || self.pricing.per_km_rate < 0.0 {
            return Err(invalid("ride_map.pricing amounts must be non-negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromoMapConfig {
    pub center: Location,
    pub zoom: u8,
    pub tiles: TileLayer,
    pub outline: Vec<Location>,
    pub pulse: PulseConfig,
    pub marker_radius: f64,
    pub highlighted_radius: f64,
}

impl Default for PromoMapConfig {
    fn default() -> Self {
        Self {
            center: NIGERIA_CENTER,
            zoom: 6,
            tiles: carto_dark_tiles(),
            outline: NIGERIA_OUTLINE.to_vec(),
            pulse: PulseConfig::default(),
            marker_radius: 6.0,
            highlighted_radius: 10.0,
        }
    }
}

impl PromoMapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_zoom("promo_map.zoom", self.zoom)?;
        validate_tiles("promo_map.tiles", &self.tiles)?;
        if self.pulse.frame_interval_ms == 0 {
            return Err(invalid("promo_map.pulse.frame_interval_ms must be positive"));
        }
        let pulse_grows = self.pulse.max_scale > 1.0 && self.pulse.scale_step > 0.0;
        if !pulse_grows {
            return Err(invalid(
                "promo_map.pulse needs max_scale > 1 and a positive scale_step",
            ));
        }
        if !(self.marker_radius > 0.0 && self.highlighted_radius > 0.0) {
            return Err(invalid("promo_map marker radii must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Show notifications as toasts; when off the host falls back to alerts.
    pub toasts_enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toasts_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetsConfig {
    pub ride_map: RideMapConfig,
    pub promo_map: PromoMapConfig,
    pub notifications: NotificationConfig,
    /// Position reported by the host's location source; absent means the
    /// host has no geolocation and the ride map falls back to its default.
    pub user_location: Option<Location>,
}

impl WidgetsConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: WidgetsConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ride_map.validate()?;
        self.promo_map.validate()?;
        if let Some(location) = self.user_location {
            if !location.is_finite() {
                return Err(invalid("user_location must be finite"));
            }
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

fn validate_zoom(field: &str, zoom: u8) -> Result<(), ConfigError> {
    if zoom > MAX_ZOOM {
        return Err(ConfigError::Invalid(format!(
            "{field} must be within 0..={MAX_ZOOM}, got {zoom}"
        )));
    }
    Ok(())
}

fn validate_tiles(field: &str, tiles: &TileLayer) -> Result<(), ConfigError> {
    validate_zoom(&format!("{field}.max_zoom"), tiles.max_zoom)?;
    if let Some(min_zoom) = tiles.min_zoom {
        if min_zoom > tiles.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "{field}.min_zoom ({min_zoom}) must not exceed max_zoom ({})",
                tiles.max_zoom
            )));
        }
    }
    Ok(())
}
