//! The mapping capability set the widgets render through.
//!
//! Widgets never draw directly. They describe layers (tile backgrounds, point
//! markers, circle markers, polylines, polygons) and popups to a
//! [`MapSurface`], and receive user input back as [`MapEvent`]s addressed by
//! [`LayerId`]. Popups carry structured content with [`PopupAction`]s instead
//! of markup with embedded handlers; the host renders them however it likes
//! and feeds a chosen action back as [`MapEvent::PopupAction`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fleet::DriverId;
use crate::geo::Location;

/// Handle to a layer added to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// `#FFD700`
    pub const GOLD: Color = Color::rgb(0xFF, 0xD7, 0x00);
    /// `#00D4AA`
    pub const TEAL: Color = Color::rgb(0x00, 0xD4, 0xAA);
    /// `#0066FF`
    pub const ROUTE_BLUE: Color = Color::rgb(0x00, 0x66, 0xFF);
    /// `rgba(30, 58, 40, 0.3)`
    pub const OUTLINE_GREEN: Color = Color::rgba(30, 58, 40, 77);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {:.2})",
                self.r,
                self.g,
                self.b,
                f64::from(self.a) / 255.0
            )
        }
    }
}

/// Which pointer/zoom interactions the view accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionOptions {
    pub zoom_control: bool,
    pub attribution_control: bool,
    pub dragging: bool,
    pub box_zoom: bool,
    pub double_click_zoom: bool,
    pub scroll_wheel_zoom: bool,
    pub track_resize: bool,
}

impl InteractionOptions {
    pub const fn interactive() -> Self {
        Self {
            zoom_control: true,
            attribution_control: true,
            dragging: true,
            box_zoom: true,
            double_click_zoom: true,
            scroll_wheel_zoom: true,
            track_resize: true,
        }
    }

    /// Fixed showcase view: no panning, zooming or resizing.
    pub const fn locked() -> Self {
        Self {
            zoom_control: false,
            attribution_control: false,
            dragging: false,
            box_zoom: false,
            double_click_zoom: false,
            scroll_wheel_zoom: false,
            track_resize: false,
        }
    }

    pub fn allows_navigation(&self) -> bool {
        self.dragging || self.box_zoom || self.double_click_zoom || self.scroll_wheel_zoom
    }
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self::interactive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Location,
    pub zoom: u8,
    pub interactions: InteractionOptions,
}

/// Raster background source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    #[serde(default)]
    pub subdomains: Option<String>,
    #[serde(default)]
    pub min_zoom: Option<u8>,
    pub max_zoom: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    User,
    Driver,
    Pickup,
    Destination,
}

/// Icon marker pinned at a location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMarker {
    pub location: Location,
    pub kind: MarkerKind,
    pub moving: bool,
}

impl PointMarker {
    pub fn new(location: Location, kind: MarkerKind) -> Self {
        Self {
            location,
            kind,
            moving: false,
        }
    }
}

/// Style of a fixed-pixel-radius circle marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub color: Color,
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub radius: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub color: Color,
    pub weight: f64,
    pub opacity: f64,
    /// Dash and gap lengths in pixels; `None` draws a solid line.
    pub dash: Option<(f32, f32)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    /// Outline color; `None` disables the stroke.
    pub stroke: Option<Color>,
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub weight: f64,
}

/// Something a popup button asks the owning widget to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupAction {
    SelectDriver(DriverId),
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverCard {
    pub initials: String,
    pub name: String,
    pub rating_label: String,
    pub vehicle: String,
    pub action_label: String,
    pub action: PopupAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityCard {
    pub name: String,
    pub rides_label: String,
    pub rating_label: String,
    pub action_label: String,
    pub action: PopupAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupContent {
    Text(String),
    Driver(DriverCard),
    City(CityCard),
}

impl PopupContent {
    pub fn text(text: impl Into<String>) -> Self {
        PopupContent::Text(text.into())
    }

    /// Actions offered by this popup, in display order.
    pub fn actions(&self) -> Vec<(&str, &PopupAction)> {
        match self {
            PopupContent::Text(_) => Vec::new(),
            PopupContent::Driver(card) => vec![(card.action_label.as_str(), &card.action)],
            PopupContent::City(card) => vec![(card.action_label.as_str(), &card.action)],
        }
    }
}

/// Input delivered from the host to a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    Click(Location),
    HoverEnter(LayerId),
    HoverLeave(LayerId),
    PopupAction(PopupAction),
}

/// The rendering capability set a widget needs from its host.
///
/// Operations addressed at a [`LayerId`] the surface no longer knows about
/// are ignored.
pub trait MapSurface {
    fn create_view(&mut self, view: MapView);
    fn set_view(&mut self, center: Location, zoom: u8);
    fn add_tile_layer(&mut self, layer: TileLayer) -> LayerId;
    fn add_marker(&mut self, marker: PointMarker) -> LayerId;
    fn add_circle_marker(&mut self, center: Location, style: CircleStyle) -> LayerId;
    fn add_polyline(&mut self, points: Vec<Location>, style: PathStyle) -> LayerId;
    fn add_polygon(&mut self, ring: Vec<Location>, style: PolygonStyle) -> LayerId;
    fn remove_layer(&mut self, id: LayerId);
    fn bind_popup(&mut self, id: LayerId, content: PopupContent);
    fn open_popup(&mut self, id: LayerId);
    fn close_popup(&mut self, id: LayerId);
    fn set_marker_position(&mut self, id: LayerId, location: Location);
    fn set_marker_moving(&mut self, id: LayerId, moving: bool);
    fn set_circle_style(&mut self, id: LayerId, style: CircleStyle);
}
