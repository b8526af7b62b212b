//! The modal create/edit/delete workflow for a single note.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::entity::{Note, NoteId};
use crate::error::{MapNotesError, Result};
use crate::storage::{KeyValueStorage, NoteStore};
use crate::viewport::LatLng;

/// Input rejected by the note form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Note text must not be empty")]
    EmptyText,

    #[error("Latitude '{0}' is not a number")]
    InvalidLatitude(String),

    #[error("Longitude '{0}' is not a number")]
    InvalidLongitude(String),
}

/// Which note, if any, the form is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Closed,
    Creating,
    Editing(NoteId),
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditorState::Closed)
    }
}

impl fmt::Display for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorState::Closed => write!(f, "closed"),
            EditorState::Creating => write!(f, "creating"),
            EditorState::Editing(id) => write!(f, "editing {}", id),
        }
    }
}

/// Raw form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub text: String,
    pub lat: String,
    pub lng: String,
}

impl FormFields {
    pub fn from_note(note: &Note) -> Self {
        Self {
            text: note.text.clone(),
            lat: note.lat.to_string(),
            lng: note.lng.to_string(),
        }
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.lat = format!("{:.6}", position.lat);
        self.lng = format!("{:.6}", position.lng);
    }

    /// Trimmed non-empty text and two finite coordinates.
    pub fn validate(&self) -> std::result::Result<Note, ValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let lat = parse_coordinate(&self.lat)
            .ok_or_else(|| ValidationError::InvalidLatitude(self.lat.clone()))?;
        let lng = parse_coordinate(&self.lng)
            .ok_or_else(|| ValidationError::InvalidLongitude(self.lng.clone()))?;
        Ok(Note::new(text, lat, lng))
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Form state plus the session it belongs to. At most one session exists.
#[derive(Debug, Default)]
pub struct NoteEditor {
    state: EditorState,
    fields: FormFields,
}

impl NoteEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Whether the delete action is offered.
    pub fn can_delete(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    pub fn title(&self) -> &'static str {
        match self.state {
            EditorState::Editing(_) => "Edit note",
            _ => "New note",
        }
    }

    pub fn open_create(&mut self) {
        self.state = EditorState::Creating;
        self.fields = FormFields::default();
        debug!(state = %self.state, "editor opened");
    }

    pub fn open_edit(&mut self, note: &Note) {
        self.state = EditorState::Editing(note.id);
        self.fields = FormFields::from_note(note);
        debug!(state = %self.state, "editor opened");
    }

    pub fn cancel(&mut self) {
        self.close();
    }

    /// Fill the coordinate fields from a map click. Returns whether the form took it.
    pub fn map_click(&mut self, position: LatLng) -> bool {
        if !self.is_open() {
            return false;
        }
        self.fields.set_position(position);
        true
    }

    /// Validate the form and write it to the store, closing the session.
    ///
    /// On a validation error nothing is stored and the session stays open.
    pub fn save<S: KeyValueStorage>(&mut self, store: &mut NoteStore<S>) -> Result<usize> {
        let editing_index = match self.state {
            EditorState::Closed => {
                return Err(MapNotesError::InvalidArgument(
                    "no note is being edited".to_string(),
                ))
            }
            EditorState::Creating => None,
            EditorState::Editing(id) => Some(resolve(store, id)?),
        };

        let note = self.fields.validate()?;
        let index = store.save_or_update(note, editing_index)?;
        self.close();
        Ok(index)
    }

    /// Delete the note being edited. Returns `false` when there is none.
    pub fn delete<S: KeyValueStorage>(&mut self, store: &mut NoteStore<S>) -> Result<bool> {
        let EditorState::Editing(id) = self.state else {
            return Ok(false);
        };
        let index = resolve(store, id)?;
        store.delete_at(index)?;
        self.close();
        Ok(true)
    }

    fn close(&mut self) {
        self.state = EditorState::Closed;
        debug!("editor closed");
    }
}

fn resolve<S: KeyValueStorage>(store: &NoteStore<S>, id: NoteId) -> Result<usize> {
    store
        .position(id)
        .ok_or_else(|| MapNotesError::InvalidArgument(format!("note {} no longer exists", id)))
}
