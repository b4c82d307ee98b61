//! Cosmetic driver movement: every tick a random subset of the fleet drifts a
//! few dozen meters.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fleet::{Driver, DriverId};
use crate::geo::centered_offset;
use crate::timers::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Tick period; also how long the "moving" flag stays on after a move.
    pub interval_ms: Millis,
    /// Chance (0.0–1.0) that a driver moves on a given tick.
    pub move_probability: f64,
    /// Full width of the per-tick displacement box per axis, in degrees (0.001 ≈ ±55 m).
    pub step_deg: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3_000,
            move_probability: 0.3,
            step_deg: 0.001,
        }
    }
}

impl MovementConfig {
    pub fn with_move_probability(mut self, move_probability: f64) -> Self {
        self.move_probability = move_probability;
        self
    }

    pub fn max_step_deg(&self) -> f64 {
        self.step_deg / 2.0
    }

    /// A unit sample above this threshold moves the driver.
    fn threshold(&self) -> f64 {
        1.0 - self.move_probability
    }
}

/// One movement tick over the whole fleet. Returns the drivers that moved, in
/// fleet order, and sets their `moving` flag.
///
/// Draw order per driver: the move roll, then (only when moving) latitude and
/// longitude offsets.
pub fn movement_tick<R: Rng>(
    drivers: &mut [Driver],
    config: &MovementConfig,
    rng: &mut R,
) -> Vec<DriverId> {
    let threshold = config.threshold();
    let mut moved = Vec::new();
    for driver in drivers.iter_mut() {
        let roll: f64 = rng.gen();
        if roll <= threshold {
            continue;
        }
        let dlat = centered_offset(rng.gen::<f64>(), config.step_deg);
        let dlng = centered_offset(rng.gen::<f64>(), config.step_deg);
        driver.location = driver.location.offset_by(dlat, dlng);
        driver.moving = true;
        moved.push(driver.id);
    }
    moved
}
