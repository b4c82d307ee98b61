//! Placeholder fare estimator for the booking map.

use serde::{Deserialize, Serialize};

use crate::geo::{planar_distance_km, Location};

/// Base fare in currency units (e.g., dollars).
pub const BASE_FARE: f64 = 2.50;

/// Per-kilometer rate in currency units.
pub const PER_KM_RATE: f64 = 1.75;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub base_fare: f64,
    pub per_km_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_fare: BASE_FARE,
            per_km_rate: PER_KM_RATE,
        }
    }
}

impl PricingConfig {
    /// Calculate the fare for a trip of `distance_km`.
    ///
    /// Formula: `fare = base_fare + (distance_km * per_km_rate)`, rounded to cents.
    pub fn fare_for_distance(&self, distance_km: f64) -> f64 {
        round_to_cents(self.base_fare + distance_km * self.per_km_rate)
    }
}

/// Distance and fare quoted for a pickup/destination pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEstimate {
    pub distance_km: f64,
    pub fare: f64,
}

impl RouteEstimate {
    pub fn between(pickup: Location, destination: Location, pricing: &PricingConfig) -> Self {
        let distance_km = planar_distance_km(pickup, destination);
        Self {
            distance_km,
            fare: pricing.fare_for_distance(distance_km),
        }
    }
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
