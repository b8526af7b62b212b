//! Spherical Web Mercator in tile-pixel space (256 px tiles).

use std::f64::consts::PI;

use crate::viewport::{LatLng, LatLngBounds};

pub const TILE_SIZE: f64 = 256.0;

pub const MAX_LATITUDE: f64 = 85.051_128_78;

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Width of the whole world in pixels at `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(i32::from(zoom))
}

/// Project to global pixel coordinates, y growing southwards.
pub fn project(point: LatLng, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = clamp(point.lat, -MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lng + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

pub fn unproject(x: f64, y: f64, zoom: u8) -> LatLng {
    let size = world_size(zoom);
    let lng = x / size * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / size)).sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Bounds of a `width` x `height` pixel viewport centered on `center`.
pub fn viewport_bounds(center: LatLng, zoom: u8, width: u32, height: u32) -> LatLngBounds {
    let (cx, cy) = project(center, zoom);
    let half_w = f64::from(width) / 2.0;
    let half_h = f64::from(height) / 2.0;

    let south_west = unproject(cx - half_w, cy + half_h, zoom);
    let north_east = unproject(cx + half_w, cy - half_h, zoom);
    LatLngBounds::new(south_west, north_east)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_project_origin() {
        let (x, y) = project(LatLng::new(0.0, 0.0), 0);
        assert!(close(x, 128.0));
        assert!(close(y, 128.0));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let point = LatLng::new(56.46361, 84.957846);
        let (x, y) = project(point, 10);
        let back = unproject(x, y, 10);
        assert!(close(back.lat, point.lat));
        assert!(close(back.lng, point.lng));
    }

    #[test]
    fn test_whole_world_at_zoom_zero() {
        let bounds = viewport_bounds(LatLng::new(0.0, 0.0), 0, 256, 256);
        assert!(close(bounds.west(), -180.0));
        assert!(close(bounds.east(), 180.0));
        assert!(close(bounds.north(), MAX_LATITUDE));
        assert!(close(bounds.south(), -MAX_LATITUDE));
    }

    #[test]
    fn test_viewport_width_in_degrees() {
        let center = LatLng::new(56.46361, 84.957846);
        let bounds = viewport_bounds(center, 10, 800, 600);

        let expected_span = 800.0 / world_size(10) * 360.0;
        assert!(close(bounds.east() - bounds.west(), expected_span));
        assert!(bounds.contains(center));
        // mercator stretches north of the center
        assert!(bounds.north() - center.lat < center.lat - bounds.south());
    }
}
