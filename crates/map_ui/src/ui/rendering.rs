//! Web-Mercator projection and painting of a widget's [`Scene`].

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Shape, Stroke, Vec2};
use map_core::config::MAX_ZOOM;
use map_core::geo::Location;
use map_core::scene::{LayerShape, Scene, SceneLayer};
use map_core::surface::{LayerId, MapView, PathStyle, PointMarker, TileLayer};

use crate::ui::utils::{marker_color, marker_label, moving_color, to_color32};

/// Edge length of a raster tile in screen points.
pub const TILE_SIZE: f64 = 256.0;

/// Screen radius of a point marker.
pub const MARKER_RADIUS: f32 = 9.0;

const MAX_LAT: f64 = 85.05112878;

fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-MAX_LAT, MAX_LAT)
}

fn lon_to_x(lon: f64, zoom: u8) -> f64 {
    let n = (1u32 << zoom) as f64;
    ((lon + 180.0) / 360.0) * n
}

fn lat_to_y(lat: f64, zoom: u8) -> f64 {
    let lat = clamp_lat(lat).to_radians();
    let n = (1u32 << zoom) as f64;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) * 0.5;
    y * n
}

fn x_to_lon(x: f64, zoom: u8) -> f64 {
    let n = (1u32 << zoom) as f64;
    x / n * 360.0 - 180.0
}

fn y_to_lat(y: f64, zoom: u8) -> f64 {
    let n = (1u32 << zoom) as f64;
    (std::f64::consts::PI * (1.0 - 2.0 * y / n))
        .sinh()
        .atan()
        .to_degrees()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// Maps locations to screen positions for one view inside one rect.
#[derive(Debug, Clone, Copy)]
pub struct MapProjection {
    zoom: u8,
    /// View center in world pixels at `zoom`.
    center_px: (f64, f64),
    rect: Rect,
}

impl MapProjection {
    pub fn new(view: &MapView, rect: Rect) -> Self {
        let zoom = view.zoom.min(MAX_ZOOM);
        let center_px = (
            lon_to_x(view.center.lng(), zoom) * TILE_SIZE,
            lat_to_y(view.center.lat(), zoom) * TILE_SIZE,
        );
        Self {
            zoom,
            center_px,
            rect,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn project(&self, location: Location) -> Pos2 {
        let x = lon_to_x(location.lng(), self.zoom) * TILE_SIZE - self.center_px.0;
        let y = lat_to_y(location.lat(), self.zoom) * TILE_SIZE - self.center_px.1;
        self.rect.center() + Vec2::new(x as f32, y as f32)
    }

    pub fn unproject(&self, pos: Pos2) -> Location {
        let offset = pos - self.rect.center();
        let world_x = (self.center_px.0 + f64::from(offset.x)) / TILE_SIZE;
        let world_y = (self.center_px.1 + f64::from(offset.y)) / TILE_SIZE;
        Location::new(y_to_lat(world_y, self.zoom), x_to_lon(world_x, self.zoom))
    }

    /// Tiles of `layer` covering the rect, with their screen rects.
    pub fn tiles_for_layer(&self, layer: &TileLayer) -> Vec<(TileKey, Rect)> {
        let min_zoom = layer.min_zoom.unwrap_or(0);
        let max_zoom = layer.max_zoom.min(MAX_ZOOM);
        let tile_zoom = self.zoom.clamp(min_zoom.min(max_zoom), max_zoom);
        let scale = 2f64.powi(i32::from(self.zoom) - i32::from(tile_zoom));
        let tile_px = TILE_SIZE * scale;

        let half = self.rect.size() / 2.0;
        let left = self.center_px.0 - f64::from(half.x);
        let top = self.center_px.1 - f64::from(half.y);
        let right = self.center_px.0 + f64::from(half.x);
        let bottom = self.center_px.1 + f64::from(half.y);

        let max_index = (1i64 << tile_zoom) - 1;
        let x_start = ((left / tile_px).floor() as i64).clamp(0, max_index);
        let x_end = ((right / tile_px).floor() as i64).clamp(0, max_index);
        let y_start = ((top / tile_px).floor() as i64).clamp(0, max_index);
        let y_end = ((bottom / tile_px).floor() as i64).clamp(0, max_index);

        let mut tiles = Vec::new();
        for x in x_start..=x_end {
            for y in y_start..=y_end {
                let min = Pos2::new(
                    (x as f64 * tile_px - left) as f32,
                    (y as f64 * tile_px - top) as f32,
                );
                let screen = Rect::from_min_size(
                    self.rect.min + min.to_vec2(),
                    Vec2::splat(tile_px as f32),
                );
                tiles.push((
                    TileKey {
                        z: tile_zoom,
                        x: x as u32,
                        y: y as u32,
                    },
                    screen,
                ));
            }
        }
        tiles
    }
}

fn is_dark(layer: &TileLayer) -> bool {
    layer.url_template.contains("dark")
}

/// Draw the tile grid standing in for a raster layer.
pub fn draw_tiles(painter: &egui::Painter, projection: &MapProjection, layer: &TileLayer) {
    let (background, line, text) = if is_dark(layer) {
        (
            Color32::from_rgb(24, 26, 32),
            Color32::from_gray(44),
            Color32::from_gray(70),
        )
    } else {
        (
            Color32::from_rgb(238, 236, 228),
            Color32::from_gray(210),
            Color32::from_gray(170),
        )
    };
    painter.rect_filled(projection.rect(), 0.0, background);
    let stroke = Stroke::new(1.0, line);
    for (key, rect) in projection.tiles_for_layer(layer) {
        painter.line_segment([rect.left_top(), rect.right_top()], stroke);
        painter.line_segment([rect.left_top(), rect.left_bottom()], stroke);
        painter.text(
            rect.left_top() + Vec2::new(4.0, 4.0),
            Align2::LEFT_TOP,
            format!("{}/{}/{}", key.z, key.x, key.y),
            FontId::monospace(9.0),
            text,
        );
    }
}

pub fn draw_attribution(painter: &egui::Painter, rect: Rect, layer: &TileLayer) {
    painter.text(
        rect.right_bottom() - Vec2::new(6.0, 4.0),
        Align2::RIGHT_BOTTOM,
        &layer.attribution,
        FontId::proportional(10.0),
        Color32::from_gray(110),
    );
}

fn path_stroke(style: &PathStyle) -> Stroke {
    Stroke::new(style.weight as f32, to_color32(style.color, style.opacity))
}

fn draw_marker(painter: &egui::Painter, pos: Pos2, marker: &PointMarker) {
    let color = if marker.moving {
        moving_color()
    } else {
        marker_color(marker.kind)
    };
    if marker.moving {
        painter.circle_stroke(pos, MARKER_RADIUS + 4.0, Stroke::new(2.0, color.gamma_multiply(0.5)));
    }
    painter.circle(pos, MARKER_RADIUS, color, Stroke::new(2.0, Color32::WHITE));
    painter.text(
        pos + Vec2::new(0.0, MARKER_RADIUS + 2.0),
        Align2::CENTER_TOP,
        marker_label(marker.kind),
        FontId::proportional(11.0),
        Color32::from_gray(30),
    );
}

/// Paint every layer of `scene` in insertion order.
pub fn paint_scene(painter: &egui::Painter, projection: &MapProjection, scene: &Scene) {
    let attribution = scene
        .view()
        .map(|view| view.interactions.attribution_control)
        .unwrap_or(false);
    for (_, layer) in scene.layers() {
        match &layer.shape {
            LayerShape::Tiles(tiles) => {
                draw_tiles(painter, projection, tiles);
                if attribution {
                    draw_attribution(painter, projection.rect(), tiles);
                }
            }
            LayerShape::Polygon { ring, style } => {
                let points: Vec<Pos2> = ring.iter().map(|at| projection.project(*at)).collect();
                let stroke = match style.stroke {
                    Some(color) => Stroke::new(style.weight as f32, to_color32(color, 1.0)),
                    None => Stroke::NONE,
                };
                let fill = to_color32(style.fill_color, style.fill_opacity);
                painter.add(Shape::convex_polygon(points, fill, stroke));
            }
            LayerShape::Polyline { points, style } => {
                let points: Vec<Pos2> = points.iter().map(|at| projection.project(*at)).collect();
                let stroke = path_stroke(style);
                match style.dash {
                    Some((dash, gap)) => {
                        painter.extend(Shape::dashed_line(&points, stroke, dash, gap));
                    }
                    None => {
                        painter.add(Shape::line(points, stroke));
                    }
                }
            }
            LayerShape::Circle { center, style } => {
                painter.circle(
                    projection.project(*center),
                    style.radius as f32,
                    to_color32(style.fill_color, style.fill_opacity),
                    Stroke::new(style.weight as f32, to_color32(style.color, 1.0)),
                );
            }
            LayerShape::Marker(marker) => {
                draw_marker(painter, projection.project(marker.location), marker);
            }
        }
    }
}

fn hit_radius(layer: &SceneLayer) -> Option<f32> {
    match &layer.shape {
        LayerShape::Marker(_) => Some(MARKER_RADIUS + 2.0),
        LayerShape::Circle { style, .. } => Some((style.radius as f32).max(6.0) + 2.0),
        _ => None,
    }
}

/// Topmost marker with a popup under `pos`, if any. Layers failing
/// `accept` are skipped.
pub fn hit_test(
    scene: &Scene,
    projection: &MapProjection,
    pos: Pos2,
    accept: impl Fn(LayerId) -> bool,
) -> Option<LayerId> {
    let layers: Vec<_> = scene.layers().collect();
    layers.into_iter().rev().find_map(|(id, layer)| {
        if layer.popup.is_none() || !accept(id) {
            return None;
        }
        let radius = hit_radius(layer)?;
        let anchor = projection.project(layer.anchor()?);
        (anchor.distance(pos) <= radius).then_some(id)
    })
}

#[cfg(test)]
mod tests {
    use map_core::surface::InteractionOptions;

    use super::*;

    fn view(center: Location, zoom: u8) -> MapView {
        MapView {
            center,
            zoom,
            interactions: InteractionOptions::interactive(),
        }
    }

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(600.0, 400.0))
    }

    #[test]
    fn view_center_projects_to_rect_center() {
        let center = Location::new(40.7128, -74.0060);
        let projection = MapProjection::new(&view(center, 13), rect());
        let pos = projection.project(center);
        assert!((pos - rect().center()).length() < 1e-3);
    }

    #[test]
    fn unproject_inverts_project() {
        let projection = MapProjection::new(&view(Location::new(6.5244, 3.3792), 15), rect());
        let here = Location::new(6.5301, 3.3712);
        let back = projection.unproject(projection.project(here));
        assert!((back.lat() - here.lat()).abs() < 1e-5);
        assert!((back.lng() - here.lng()).abs() < 1e-5);
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let center = Location::new(9.0820, 8.6753);
        let projection = MapProjection::new(&view(center, 6), rect());
        let north_east = projection.project(center.offset_by(1.0, 1.0));
        let middle = projection.project(center);
        assert!(north_east.x > middle.x);
        assert!(north_east.y < middle.y);
    }

    #[test]
    fn tiles_cover_the_rect_and_respect_max_zoom() {
        let center = Location::new(9.0820, 8.6753);
        let projection = MapProjection::new(&view(center, 12), rect());
        let layer = map_core::config::carto_dark_tiles();
        let tiles = projection.tiles_for_layer(&layer);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|(key, _)| key.z == 10));
        let covered = tiles
            .iter()
            .fold(Rect::NOTHING, |acc, (_, screen)| acc.union(*screen));
        assert!(covered.contains_rect(rect()));
    }

    #[test]
    fn zoom_beyond_the_tile_pyramid_is_clamped() {
        let center = Location::new(6.5244, 3.3792);
        let projection = MapProjection::new(&view(center, 40), rect());
        assert!((projection.project(center) - rect().center()).length() < 1e-3);

        let mut layer = map_core::config::openstreetmap_tiles();
        layer.max_zoom = 64;
        let tiles = projection.tiles_for_layer(&layer);
        assert!(tiles.iter().all(|(key, _)| key.z == MAX_ZOOM));
    }
}
