//! Fixed table of Nigerian cities shown on the promotional map.

use crate::geo::Location;
use crate::navigation::SIGNUP_PAGE;
use crate::surface::{CityCard, PopupAction};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub location: Location,
    pub daily_rides: u32,
    pub rating: f64,
}

impl City {
    const fn new(name: &'static str, lat: f64, lng: f64, daily_rides: u32, rating: f64) -> Self {
        Self {
            name,
            location: Location::new(lat, lng),
            daily_rides,
            rating,
        }
    }

    pub fn popup_card(&self) -> CityCard {
        CityCard {
            name: self.name.to_string(),
            rides_label: format!("{}+ rides daily", format_thousands(self.daily_rides)),
            rating_label: format!("{}★ rating", self.rating),
            action_label: format!("Ride in {}", self.name),
            action: PopupAction::Navigate(SIGNUP_PAGE.to_string()),
        }
    }
}

pub const CITIES: [City; 12] = [
    City::new("Lagos", 6.5244, 3.3792, 15_000, 4.7),
    City::new("Abuja", 9.0765, 7.3986, 8_000, 4.8),
    City::new("Port Harcourt", 4.8156, 7.0498, 5_000, 4.6),
    City::new("Ibadan", 7.3775, 3.9470, 4_000, 4.5),
    City::new("Kano", 12.0022, 8.5920, 3_000, 4.6),
    City::new("Benin City", 6.3350, 5.6037, 2_500, 4.4),
    City::new("Kaduna", 10.5105, 7.4165, 2_000, 4.5),
    City::new("Aba", 5.1164, 7.3667, 1_800, 4.3),
    City::new("Jos", 9.8965, 8.8583, 1_500, 4.6),
    City::new("Ilorin", 8.4966, 4.5421, 1_200, 4.4),
    City::new("Warri", 5.5174, 5.7501, 1_000, 4.3),
    City::new("Enugu", 6.4584, 7.5464, 900, 4.5),
];

/// Simplified rectangular outline of Nigeria.
pub const NIGERIA_OUTLINE: [Location; 4] = [
    Location::new(13.9, 2.7),
    Location::new(13.9, 14.7),
    Location::new(4.3, 14.7),
    Location::new(4.3, 2.7),
];

pub const NIGERIA_CENTER: Location = Location::new(9.0820, 8.6753);

fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_comma_separated() {
        assert_eq!(format_thousands(900), "900");
        assert_eq!(format_thousands(1_800), "1,800");
        assert_eq!(format_thousands(15_000), "15,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn lagos_card_links_to_signup() {
        let lagos = &CITIES[0];
        assert_eq!(lagos.name, "Lagos");
        let card = lagos.popup_card();
        assert_eq!(card.rides_label, "15,000+ rides daily");
        assert_eq!(card.rating_label, "4.7★ rating");
        assert_eq!(card.action_label, "Ride in Lagos");
        assert_eq!(card.action, PopupAction::Navigate("signup.html".to_string()));
    }

    #[test]
    fn every_city_sits_inside_the_outline() {
        for city in &CITIES {
            assert!((4.3..=13.9).contains(&city.location.lat()), "{}", city.name);
            assert!((2.7..=14.7).contains(&city.location.lng()), "{}", city.name);
        }
    }
}
