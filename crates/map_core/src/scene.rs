//! Retained-mode [`MapSurface`]: keeps every layer in memory so a host can
//! paint it each frame (and tests can inspect it).

use std::collections::BTreeMap;

use crate::geo::Location;
use crate::surface::{
    CircleStyle, LayerId, MapSurface, MapView, PathStyle, PointMarker, PolygonStyle,
    PopupContent, TileLayer,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LayerShape {
    Tiles(TileLayer),
    Marker(PointMarker),
    Circle { center: Location, style: CircleStyle },
    Polyline { points: Vec<Location>, style: PathStyle },
    Polygon { ring: Vec<Location>, style: PolygonStyle },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayer {
    pub shape: LayerShape,
    pub popup: Option<PopupContent>,
    pub popup_open: bool,
}

impl SceneLayer {
    /// Anchor used for popups and hit testing; `None` for tiles.
    pub fn anchor(&self) -> Option<Location> {
        match &self.shape {
            LayerShape::Tiles(_) => None,
            LayerShape::Marker(marker) => Some(marker.location),
            LayerShape::Circle { center, .. } => Some(*center),
            LayerShape::Polyline { points, .. } => points.first().copied(),
            LayerShape::Polygon { ring, .. } => ring.first().copied(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    view: Option<MapView>,
    layers: BTreeMap<LayerId, SceneLayer>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&MapView> {
        self.view.as_ref()
    }

    /// Layers in insertion (paint) order.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &SceneLayer)> {
        self.layers.iter().map(|(id, layer)| (*id, layer))
    }

    pub fn layer(&self, id: LayerId) -> Option<&SceneLayer> {
        self.layers.get(&id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn marker(&self, id: LayerId) -> Option<&PointMarker> {
        match &self.layers.get(&id)?.shape {
            LayerShape::Marker(marker) => Some(marker),
            _ => None,
        }
    }

    pub fn circle(&self, id: LayerId) -> Option<(Location, &CircleStyle)> {
        match &self.layers.get(&id)?.shape {
            LayerShape::Circle { center, style } => Some((*center, style)),
            _ => None,
        }
    }

    pub fn popup(&self, id: LayerId) -> Option<&PopupContent> {
        self.layers.get(&id)?.popup.as_ref()
    }

    pub fn is_popup_open(&self, id: LayerId) -> bool {
        self.layers
            .get(&id)
            .map(|layer| layer.popup_open)
            .unwrap_or(false)
    }

    pub fn open_popups(&self) -> impl Iterator<Item = (LayerId, &SceneLayer)> {
        self.layers().filter(|(_, layer)| layer.popup_open)
    }

    pub fn close_all_popups(&mut self) {
        for layer in self.layers.values_mut() {
            layer.popup_open = false;
        }
    }

    pub fn count_where(&self, predicate: impl Fn(&LayerShape) -> bool) -> usize {
        self.layers
            .values()
            .filter(|layer| predicate(&layer.shape))
            .count()
    }

    fn insert(&mut self, shape: LayerShape) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(
            id,
            SceneLayer {
                shape,
                popup: None,
                popup_open: false,
            },
        );
        id
    }
}

impl MapSurface for Scene {
    fn create_view(&mut self, view: MapView) {
        self.view = Some(view);
    }

    fn set_view(&mut self, center: Location, zoom: u8) {
        match self.view.as_mut() {
            Some(view) => {
                view.center = center;
                view.zoom = zoom;
            }
            None => {
                self.view = Some(MapView {
                    center,
                    zoom,
                    interactions: Default::default(),
                })
            }
        }
    }

    fn add_tile_layer(&mut self, layer: TileLayer) -> LayerId {
        self.insert(LayerShape::Tiles(layer))
    }

    fn add_marker(&mut self, marker: PointMarker) -> LayerId {
        self.insert(LayerShape::Marker(marker))
    }

    fn add_circle_marker(&mut self, center: Location, style: CircleStyle) -> LayerId {
        self.insert(LayerShape::Circle { center, style })
    }

    fn add_polyline(&mut self, points: Vec<Location>, style: PathStyle) -> LayerId {
        self.insert(LayerShape::Polyline { points, style })
    }

    fn add_polygon(&mut self, ring: Vec<Location>, style: PolygonStyle) -> LayerId {
        self.insert(LayerShape::Polygon { ring, style })
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
    }

    fn bind_popup(&mut self, id: LayerId, content: PopupContent) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.popup = Some(content);
        }
    }

    fn open_popup(&mut self, id: LayerId) {
        if let Some(layer) = self.layers.get_mut(&id) {
            if layer.popup.is_some() {
                layer.popup_open = true;
            }
        }
    }

    fn close_popup(&mut self, id: LayerId) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.popup_open = false;
        }
    }

    fn set_marker_position(&mut self, id: LayerId, location: Location) {
        let Some(layer) = self.layers.get_mut(&id) else {
            return;
        };
        match &mut layer.shape {
            LayerShape::Marker(marker) => marker.location = location,
            LayerShape::Circle { center, .. } => *center = location,
            _ => {}
        }
    }

    fn set_marker_moving(&mut self, id: LayerId, moving: bool) {
        if let Some(SceneLayer {
            shape: LayerShape::Marker(marker),
            ..
        }) = self.layers.get_mut(&id)
        {
            marker.moving = moving;
        }
    }

    fn set_circle_style(&mut self, id: LayerId, new_style: CircleStyle) {
        if let Some(SceneLayer {
            shape: LayerShape::Circle { style, .. },
            ..
        }) = self.layers.get_mut(&id)
        {
            *style = new_style;
        }
    }
}
