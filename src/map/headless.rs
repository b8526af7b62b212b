use std::collections::BTreeMap;

use tracing::debug;

use super::projection::viewport_bounds;
use super::{MapWidget, MarkerId, TileLayer};
use crate::viewport::{LatLng, LatLngBounds};

pub const MAX_ZOOM: u8 = 19;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    pub position: LatLng,
    pub popup: String,
    pub visible: bool,
}

/// Map widget without a screen: a fixed pixel viewport over Web Mercator.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    center: LatLng,
    zoom: u8,
    width: u32,
    height: u32,
    tile_layer: Option<TileLayer>,
    markers: BTreeMap<MarkerId, MarkerState>,
    next_marker: u64,
}

impl HeadlessMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            center: LatLng::new(0.0, 0.0),
            zoom: 0,
            width,
            height,
            tile_layer: None,
            markers: BTreeMap::new(),
            next_marker: 1,
        }
    }

    pub fn tile_layer(&self) -> Option<&TileLayer> {
        self.tile_layer.as_ref()
    }

    pub fn marker(&self, marker: MarkerId) -> Option<&MarkerState> {
        self.markers.get(&marker)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Popups of the markers currently shown, in creation order.
    pub fn visible_popups(&self) -> Vec<&str> {
        self.markers
            .values()
            .filter(|m| m.visible)
            .map(|m| m.popup.as_str())
            .collect()
    }
}

impl MapWidget for HeadlessMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.center = center;
        self.zoom = zoom.min(MAX_ZOOM);
        debug!(center = %self.center, zoom = self.zoom, "view set");
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn bounds(&self) -> LatLngBounds {
        viewport_bounds(self.center, self.zoom, self.width, self.height)
    }

    fn add_tile_layer(&mut self, layer: TileLayer) {
        self.tile_layer = Some(layer);
    }

    fn remove_tile_layer(&mut self) {
        self.tile_layer = None;
    }

    fn add_marker(&mut self, position: LatLng, popup: &str) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(
            id,
            MarkerState {
                position,
                popup: popup.to_string(),
                visible: true,
            },
        );
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
    }

    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool) {
        if let Some(state) = self.markers.get_mut(&marker) {
            state.visible = visible;
        }
    }

    fn has_marker(&self, marker: MarkerId) -> bool {
        self.markers.contains_key(&marker)
    }
}
