//! Geographic primitives: locations and the planar degree-distance approximation.
//!
//! Distances here are deliberately *not* geodesic. The ride map quotes fares from
//! `sqrt(Δlat² + Δlng²) × 111`, treating a degree of longitude as long as a
//! degree of latitude regardless of where on the globe the points sit. The
//! quoted numbers are part of the widget's observable behavior.

use serde::{Deserialize, Serialize};

/// Kilometers per degree used by the planar approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

/// A captured (latitude, longitude) pair in degrees.
///
/// Locations are values: once captured from a geolocation source or a click
/// they are never mutated, only replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    lat: f64,
    lng: f64,
}

impl Location {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// A new location displaced by the given degree offsets.
    pub fn offset_by(&self, dlat: f64, dlng: f64) -> Self {
        Self::new(self.lat + dlat, self.lng + dlng)
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Straight-line distance in kilometers between two points, measured in
/// unweighted degrees and scaled by [`KM_PER_DEGREE`].
pub fn planar_distance_km(a: Location, b: Location) -> f64 {
    let dlat = b.lat - a.lat;
    let dlng = b.lng - a.lng;
    (dlat * dlat + dlng * dlng).sqrt() * KM_PER_DEGREE
}

/// Uniform offset in `[-span / 2, span / 2)` from a unit sample in `[0, 1)`.
pub(crate) fn centered_offset(unit_sample: f64, span_deg: f64) -> f64 {
    (unit_sample - 0.5) * span_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Location::new(10.0, 20.0);
        let b = Location::new(11.0, 20.0);
        assert!((planar_distance_km(a, b) - 111.0).abs() < 1e-9);
    }

    #[test]
    fn longitude_is_not_weighted_by_latitude() {
        let equator = planar_distance_km(Location::new(0.0, 0.0), Location::new(0.0, 1.0));
        let north = planar_distance_km(Location::new(60.0, 0.0), Location::new(60.0, 1.0));
        assert!((equator - north).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric_and_zero_for_same_point() {
        let a = Location::new(40.7128, -74.0060);
        let b = Location::new(40.7306, -73.9352);
        assert_eq!(planar_distance_km(a, a), 0.0);
        assert!((planar_distance_km(a, b) - planar_distance_km(b, a)).abs() < 1e-12);
    }

    #[test]
    fn centered_offset_spans_half_the_range_each_way() {
        assert_eq!(centered_offset(0.0, 0.02), -0.01);
        assert_eq!(centered_offset(0.5, 0.02), 0.0);
        assert!(centered_offset(0.999_999, 0.02) < 0.01);
    }
}
