//! Geographic coordinates, viewport bounds and the visibility filter.
//!
//! The filter never mutates notes. It only answers which notes fall inside the
//! current viewport, so callers can show or hide markers accordingly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::Note;
use crate::error::MapNotesError;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`.
impl FromStr for LatLng {
    type Err = MapNotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MapNotesError::InvalidArgument(format!("expected 'lat,lng', got '{}'", s));

        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid());
        }
        Ok(Self { lat, lng })
    }
}

/// Rectangular geographic region, stored as its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Builds bounds from any two opposite corners.
    pub fn new(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south()
            && point.lat <= self.north()
            && point.lng >= self.west()
            && point.lng <= self.east()
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }
}

impl fmt::Display for LatLngBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}] - [{:.6}, {:.6}]",
            self.south(),
            self.west(),
            self.north(),
            self.east()
        )
    }
}

pub fn is_visible(bounds: &LatLngBounds, note: &Note) -> bool {
    bounds.contains(note.position())
}

/// Indices of the notes inside `bounds`, in collection order.
pub fn visible_indices(bounds: &LatLngBounds, notes: &[Note]) -> Vec<usize> {
    notes
        .iter()
        .enumerate()
        .filter(|(_, note)| is_visible(bounds, note))
        .map(|(index, _)| index)
        .collect()
}

pub fn visible_notes<'a>(bounds: &LatLngBounds, notes: &'a [Note]) -> Vec<&'a Note> {
    notes.iter().filter(|note| is_visible(bounds, note)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tomsk() -> LatLngBounds {
        LatLngBounds::new(LatLng::new(56.0, 84.0), LatLng::new(57.0, 85.5))
    }

    #[test]
    fn test_new_normalizes_corners() {
        let bounds = LatLngBounds::new(LatLng::new(57.0, 85.5), LatLng::new(56.0, 84.0));
        assert_eq!(bounds, tomsk());
        assert_eq!(bounds.center(), LatLng::new(56.5, 84.75));
    }

    #[test]
    fn test_contains_is_inclusive_of_edges() {
        let bounds = tomsk();
        assert!(bounds.contains(LatLng::new(56.0, 84.0)));
        assert!(bounds.contains(LatLng::new(57.0, 85.5)));
        assert!(bounds.contains(LatLng::new(56.5, 85.5)));
        assert!(!bounds.contains(LatLng::new(57.000001, 85.0)));
        assert!(!bounds.contains(LatLng::new(56.5, 83.99)));
    }

    #[test]
    fn test_two_inside_one_outside() {
        let notes = vec![
            Note::new("Outside", 55.75, 37.62),
            Note::new("Cafe", 56.46, 84.95),
            Note::new("Park", 56.48, 84.99),
        ];

        let visible = visible_indices(&tomsk(), &notes);
        assert_eq!(visible, vec![1, 2]);

        let texts: Vec<&str> = visible_notes(&tomsk(), &notes)
            .iter()
            .map(|n| n.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Cafe", "Park"]);
    }

    #[test]
    fn test_visibility_independent_of_order() {
        let mut notes = vec![
            Note::new("Cafe", 56.46, 84.95),
            Note::new("Outside", 55.75, 37.62),
            Note::new("Park", 56.48, 84.99),
        ];
        notes.reverse();

        let visible = visible_notes(&tomsk(), &notes);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|n| n.text != "Outside"));
    }

    #[test]
    fn test_filter_does_not_mutate_notes() {
        let notes = vec![Note::new("Cafe", 56.46, 84.95)];
        let before = notes.clone();
        let _ = visible_indices(&tomsk(), &notes);
        assert_eq!(notes, before);
    }

    #[test]
    fn test_parse_lat_lng() {
        let parsed: LatLng = "56.46, 84.95".parse().unwrap();
        assert_eq!(parsed, LatLng::new(56.46, 84.95));

        assert!("56.46".parse::<LatLng>().is_err());
        assert!("abc,1".parse::<LatLng>().is_err());
        assert!("NaN,1".parse::<LatLng>().is_err());
    }
}
