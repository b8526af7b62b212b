//! Keeps map markers and list entries in step with the note collection.

use std::collections::HashMap;

use tracing::debug;

use crate::entity::{Note, NoteId};
use crate::map::{MapWidget, MarkerId};
use crate::ui::{ListEntry, NoteUi};
use crate::viewport::is_visible;

/// Marker registry keyed by note id.
#[derive(Debug, Default)]
pub struct Presenter {
    markers: HashMap<NoteId, MarkerId>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_for(&self, id: NoteId) -> Option<MarkerId> {
        self.markers.get(&id).copied()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Rebuild every marker and list entry.
    ///
    /// All notes get a list entry and a marker; markers outside the current
    /// bounds are hidden straight away.
    pub fn render_all<M: MapWidget, U: NoteUi>(&mut self, map: &mut M, ui: &mut U, notes: &[Note]) {
        for (_, marker) in self.markers.drain() {
            map.remove_marker(marker);
        }
        ui.clear_list();

        let bounds = map.bounds();
        for (index, note) in notes.iter().enumerate() {
            ui.push_list_entry(ListEntry {
                index,
                text: note.text.clone(),
                lat: note.lat,
                lng: note.lng,
            });

            let marker = map.add_marker(note.position(), &note.text);
            map.set_marker_visible(marker, is_visible(&bounds, note));
            self.markers.insert(note.id, marker);
        }
        debug!(count = notes.len(), "rendered notes");
    }

    /// Show or hide markers for the current bounds without rebuilding anything.
    pub fn refresh_visibility<M: MapWidget>(&self, map: &mut M, notes: &[Note]) {
        let bounds = map.bounds();
        let mut shown = 0usize;
        for note in notes {
            if let Some(&marker) = self.markers.get(&note.id) {
                let visible = is_visible(&bounds, note);
                shown += usize::from(visible);
                map.set_marker_visible(marker, visible);
            }
        }
        debug!(%bounds, shown, total = notes.len(), "refreshed marker visibility");
    }
}
