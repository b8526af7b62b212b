//! The map widget boundary: what the note workflow needs from a slippy map.

mod headless;
pub mod projection;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::viewport::{LatLng, LatLngBounds};

pub use headless::{HeadlessMap, MarkerState, MAX_ZOOM};

/// Handle to a marker placed on a map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Raster tile source shown under the markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
        }
    }
}

/// Operations consumed from the map widget.
///
/// Move-end and click events are delivered by the host calling
/// [`crate::App::on_move_end`] and [`crate::App::on_map_click`].
pub trait MapWidget {
    fn set_view(&mut self, center: LatLng, zoom: u8);

    fn center(&self) -> LatLng;

    fn zoom(&self) -> u8;

    /// Region currently visible.
    fn bounds(&self) -> LatLngBounds;

    fn add_tile_layer(&mut self, layer: TileLayer);

    fn remove_tile_layer(&mut self);

    /// Place a marker with a popup label. New markers are visible.
    fn add_marker(&mut self, position: LatLng, popup: &str) -> MarkerId;

    fn remove_marker(&mut self, marker: MarkerId);

    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool);

    fn has_marker(&self, marker: MarkerId) -> bool;
}
