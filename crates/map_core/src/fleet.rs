//! Simulated driver fleet around the user's position.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geo::{centered_offset, Location};
use crate::surface::{DriverCard, PopupAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DriverId(pub u32);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "driver_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: DriverId,
    pub location: Location,
    pub name: String,
    /// One decimal place, within the fleet's rating bounds.
    pub rating: f64,
    pub vehicle: String,
    pub available: bool,
    pub moving: bool,
}

impl Driver {
    /// Initials of each word of the display name ("Driver 3" -> "D3").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }

    pub fn popup_card(&self) -> DriverCard {
        DriverCard {
            initials: self.initials(),
            name: self.name.clone(),
            rating_label: format!("⭐ {:.1}", self.rating),
            vehicle: self.vehicle.clone(),
            action_label: "Select Driver".to_string(),
            action: PopupAction::SelectDriver(self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Number of drivers generated around the user.
    pub size: usize,
    /// Full width of the placement box per axis, in degrees (0.02 ≈ ±1.1 km).
    pub spread_deg: f64,
    pub rating_min: f64,
    pub rating_max: f64,
    pub vehicle_model: String,
    /// Model year of the first driver's car; each following driver adds one.
    pub first_model_year: u32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            size: 8,
            spread_deg: 0.02,
            rating_min: 4.5,
            rating_max: 5.0,
            vehicle_model: "Toyota Camry".to_string(),
            first_model_year: 2020,
        }
    }
}

impl FleetConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
}

/// Create `count` drivers scattered uniformly in a box around `origin`.
///
/// Draw order per driver: latitude offset, longitude offset, rating.
pub fn generate_fleet<R: Rng>(
    origin: Location,
    count: usize,
    config: &FleetConfig,
    rng: &mut R,
) -> Vec<Driver> {
    (0..count)
        .map(|index| create_driver(origin, index, config, rng))
        .collect()
}

fn create_driver<R: Rng>(
    origin: Location,
    index: usize,
    config: &FleetConfig,
    rng: &mut R,
) -> Driver {
    let dlat = centered_offset(rng.gen::<f64>(), config.spread_deg);
    let dlng = centered_offset(rng.gen::<f64>(), config.spread_deg);
    let rating_span = config.rating_max - config.rating_min;
    let rating = round_to_tenth(config.rating_min + rng.gen::<f64>() * rating_span)
        .clamp(config.rating_min, config.rating_max);
    let model_year = config.first_model_year as usize + index;
    Driver {
        id: DriverId(index as u32),
        location: origin.offset_by(dlat, dlng),
        name: format!("Driver {}", index + 1),
        rating,
        vehicle: format!("{} {}", config.vehicle_model, model_year),
        available: true,
        moving: false,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
