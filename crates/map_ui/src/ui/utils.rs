use eframe::egui::Color32;
use map_core::surface::{Color, MarkerKind};

/// Convert a widget color, scaling its alpha by `opacity`.
pub fn to_color32(color: Color, opacity: f64) -> Color32 {
    let alpha = (f64::from(color.a) * opacity.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

pub fn marker_color(kind: MarkerKind) -> Color32 {
    match kind {
        MarkerKind::User => Color32::from_rgb(0, 102, 255),
        MarkerKind::Driver => Color32::from_rgb(16, 185, 129),
        MarkerKind::Pickup => Color32::from_rgb(34, 197, 94),
        MarkerKind::Destination => Color32::from_rgb(239, 68, 68),
    }
}

pub fn marker_label(kind: MarkerKind) -> &'static str {
    match kind {
        MarkerKind::User => "You",
        MarkerKind::Driver => "🚗",
        MarkerKind::Pickup => "P",
        MarkerKind::Destination => "D",
    }
}

/// Moving drivers get a warmer tint.
pub fn moving_color() -> Color32 {
    Color32::from_rgb(245, 158, 11)
}
