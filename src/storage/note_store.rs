use tracing::{debug, warn};

use super::KeyValueStorage;
use crate::entity::{Note, NoteId};
use crate::error::{MapNotesError, Result};

pub const DEFAULT_STORAGE_KEY: &str = "notes";

/// Ordered note collection mirrored to a storage key.
///
/// Every mutation writes the full collection as a JSON array before it returns.
pub struct NoteStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    notes: Vec<Note>,
}

impl<S: KeyValueStorage> NoteStore<S> {
    /// Load the snapshot stored under `key`.
    ///
    /// A missing, unreadable or corrupt snapshot yields an empty collection;
    /// individual malformed entries are skipped.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let notes = load_all(&storage, &key);
        Self {
            storage,
            key,
            notes,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Current index of the note with `id`
    pub fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append `note`, or replace the note at `editing_index`.
    ///
    /// The note is stored as given; validation is the caller's job. A replaced
    /// note keeps the id of the note it replaces. Returns the note's index.
    pub fn save_or_update(&mut self, mut note: Note, editing_index: Option<usize>) -> Result<usize> {
        let index = match editing_index {
            None => {
                self.notes.push(note);
                self.notes.len() - 1
            }
            Some(index) => {
                let len = self.notes.len();
                let slot = self
                    .notes
                    .get_mut(index)
                    .ok_or(MapNotesError::IndexOutOfRange { index, len })?;
                note.id = slot.id;
                *slot = note;
                index
            }
        };
        debug!(index, count = self.notes.len(), "note saved");
        self.persist();
        Ok(index)
    }

    /// Remove the note at `index`; later notes shift down by one.
    pub fn delete_at(&mut self, index: usize) -> Result<Note> {
        if index >= self.notes.len() {
            return Err(MapNotesError::IndexOutOfRange {
                index,
                len: self.notes.len(),
            });
        }
        let removed = self.notes.remove(index);
        debug!(index, count = self.notes.len(), "note deleted");
        self.persist();
        Ok(removed)
    }

    // Write failures (quota, permissions) are logged and otherwise ignored.
    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.notes) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %self.key, "failed to serialize notes: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(&self.key, &json) {
            warn!(key = %self.key, "failed to persist notes: {}", e);
        }
    }
}

/// Read the snapshot under `key`, falling back to an empty collection.
pub fn load_all<S: KeyValueStorage>(storage: &S, key: &str) -> Vec<Note> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored notes");
            return Vec::new();
        }
        Err(e) => {
            warn!(key, "failed to read notes, starting empty: {}", e);
            return Vec::new();
        }
    };

    let items = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&raw) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            warn!(key, "stored notes are corrupt, starting empty: {}", e);
            return Vec::new();
        }
    };

    // A malformed entry (e.g. a `null` coordinate) is dropped on its own.
    let notes: Vec<Note> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Note>(item) {
            Ok(note) if note.lat.is_finite() && note.lng.is_finite() => Some(note),
            Ok(_) => {
                warn!(key, index, "skipping stored note with non-finite coordinates");
                None
            }
            Err(e) => {
                warn!(key, index, "skipping malformed stored note: {}", e);
                None
            }
        })
        .collect();
    debug!(key, count = notes.len(), "loaded notes");
    notes
}
