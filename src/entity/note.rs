// src/entity/note.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::viewport::LatLng;

/// In-memory identity of a note.
///
/// Ids are generated when a note is created or loaded and are never written to
/// storage, so they only live as long as the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A text annotation pinned to a geographic coordinate.
///
/// Serialized as `{ "text": ..., "lat": ..., "lng": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(skip)]
    pub id: NoteId,
    pub text: String,
    pub lat: f64,
    pub lng: f64,
}

impl Note {
    pub fn new(text: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: NoteId::new(),
            text: text.into(),
            lat,
            lng,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

// Ids are regenerated on every load, so equality only looks at stored content.
impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.lat == other.lat && self.lng == other.lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape_has_no_id() {
        let note = Note::new("Cafe", 56.46, 84.95);
        let value = serde_json::to_value(&note).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 3);
        assert_eq!(obj["text"], "Cafe");
        assert_eq!(obj["lat"], 56.46);
        assert_eq!(obj["lng"], 84.95);
    }

    #[test]
    fn test_deserialize_assigns_fresh_ids() {
        let json = r#"[{"text":"a","lat":1.0,"lng":2.0},{"text":"b","lat":3.0,"lng":4.0}]"#;
        let notes: Vec<Note> = serde_json::from_str(json).unwrap();

        assert_eq!(notes.len(), 2);
        assert_ne!(notes[0].id, notes[1].id);
        assert_eq!(notes[1].position(), LatLng::new(3.0, 4.0));
    }

    #[test]
    fn test_equality_ignores_id() {
        let a = Note::new("same", 1.0, 2.0);
        let b = Note::new("same", 1.0, 2.0);
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
        assert_ne!(a, Note::new("other", 1.0, 2.0));
    }
}
