//! Application state and the event handlers that drive it.

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::editor::{EditorState, NoteEditor};
use crate::error::{MapNotesError, Result};
use crate::map::MapWidget;
use crate::presenter::Presenter;
use crate::storage::{KeyValueStorage, NoteStore};
use crate::ui::NoteUi;
use crate::viewport::{visible_indices, LatLng};

/// Everything the note overlay owns: the store, the single editing session, the
/// marker registry and the two widgets it talks to.
pub struct App<S: KeyValueStorage, M: MapWidget, U: NoteUi> {
    store: NoteStore<S>,
    editor: NoteEditor,
    presenter: Presenter,
    map: M,
    ui: U,
}

impl<S: KeyValueStorage, M: MapWidget, U: NoteUi> App<S, M, U> {
    /// Load the stored notes, set up the map and render once.
    pub fn new(config: &AppConfig, storage: S, mut map: M, ui: U) -> Self {
        let store = NoteStore::open(storage, config.storage_key.clone());
        map.add_tile_layer(config.tile_layer.clone());
        map.set_view(config.initial_center, config.initial_zoom);

        let mut app = Self {
            store,
            editor: NoteEditor::new(),
            presenter: Presenter::new(),
            map,
            ui,
        };
        app.render();
        info!(notes = app.store.len(), "map notes ready");
        app
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn editor_state(&self) -> EditorState {
        self.editor.state()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Indices of the notes inside the current viewport.
    pub fn visible_indices(&self) -> Vec<usize> {
        visible_indices(&self.map.bounds(), self.store.notes())
    }

    pub fn on_add_clicked(&mut self) {
        self.editor.open_create();
        self.show_editor();
    }

    /// Open the note at `index` for editing and center the map on it.
    pub fn on_note_selected(&mut self, index: usize) -> Result<()> {
        let note = self.store.get(index).ok_or(MapNotesError::IndexOutOfRange {
            index,
            len: self.store.len(),
        })?;
        self.editor.open_edit(note);
        let center = note.position();
        let zoom = self.map.zoom();
        self.map.set_view(center, zoom);
        self.show_editor();
        Ok(())
    }

    /// Copy a clicked map location into the open form.
    pub fn on_map_click(&mut self, position: LatLng) {
        self.sync_fields_from_ui();
        if self.editor.map_click(position) {
            self.ui.set_fields(self.editor.fields());
        }
    }

    /// Validate and store the form.
    ///
    /// Invalid input is alerted and leaves everything as it was; the error is
    /// also returned so non-interactive hosts can act on it.
    pub fn on_save(&mut self) -> Result<usize> {
        self.sync_fields_from_ui();
        match self.editor.save(&mut self.store) {
            Ok(index) => {
                self.ui.hide_modal();
                self.render();
                Ok(index)
            }
            Err(MapNotesError::Validation(e)) => {
                debug!("rejected note: {}", e);
                self.ui.alert(&e.to_string());
                Err(MapNotesError::Validation(e))
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the note being edited. Does nothing unless a note is open for editing.
    pub fn on_delete(&mut self) -> Result<bool> {
        let deleted = self.editor.delete(&mut self.store)?;
        if deleted {
            self.ui.hide_modal();
            self.render();
        }
        Ok(deleted)
    }

    pub fn on_cancel(&mut self) {
        self.editor.cancel();
        self.ui.hide_modal();
    }

    /// The viewport moved or zoomed.
    pub fn on_move_end(&mut self) {
        self.presenter
            .refresh_visibility(&mut self.map, self.store.notes());
    }

    fn render(&mut self) {
        self.presenter
            .render_all(&mut self.map, &mut self.ui, self.store.notes());
    }

    fn show_editor(&mut self) {
        self.ui.set_fields(self.editor.fields());
        self.ui.show_modal(self.editor.title(), self.editor.can_delete());
    }

    fn sync_fields_from_ui(&mut self) {
        if self.editor.is_open() {
            *self.editor.fields_mut() = self.ui.fields();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ValidationError;
    use crate::entity::Note;
    use crate::map::HeadlessMap;
    use crate::storage::MemoryStorage;
    use crate::ui::HeadlessUi;

    type TestApp = App<MemoryStorage, HeadlessMap, HeadlessUi>;

    fn app_with(storage: MemoryStorage) -> TestApp {
        App::new(
            &AppConfig::default(),
            storage,
            HeadlessMap::new(800, 600),
            HeadlessUi::new(),
        )
    }

    fn create(app: &mut TestApp, text: &str, lat: &str, lng: &str) -> Result<usize> {
        app.on_add_clicked();
        app.ui_mut().type_fields(text, lat, lng);
        app.on_save()
    }

    fn stored(app: &TestApp) -> String {
        app.store().storage().get_item("notes").unwrap().unwrap()
    }

    #[test]
    fn test_new_sets_up_map() {
        let app = app_with(MemoryStorage::new());
        assert!(app.map().tile_layer().is_some());
        assert_eq!(app.map().zoom(), 10);
        assert_eq!(app.map().center(), LatLng::new(56.463610, 84.957846));
        assert_eq!(app.editor_state(), EditorState::Closed);
    }

    #[test]
    fn test_new_renders_stored_notes() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                "notes",
                r#"[{"text":"Cafe","lat":56.46,"lng":84.95},{"text":"Moscow","lat":55.75,"lng":37.62}]"#,
            )
            .unwrap();
        let app = app_with(storage);

        assert_eq!(app.ui().list().len(), 2);
        assert_eq!(app.map().visible_popups(), vec!["Cafe"]);
        assert_eq!(app.visible_indices(), vec![0]);
    }

    #[test]
    fn test_cafe_scenario() {
        let mut app = app_with(MemoryStorage::new());

        create(&mut app, "Cafe", "56.46", "84.95").unwrap();
        assert_eq!(app.store().len(), 1);
        assert!(!app.ui().is_modal_open());
        assert_eq!(stored(&app), r#"[{"text":"Cafe","lat":56.46,"lng":84.95}]"#);

        app.on_note_selected(0).unwrap();
        assert_eq!(app.ui().modal().unwrap().title, "Edit note");
        assert!(app.ui().modal().unwrap().show_delete);
        app.ui_mut().type_fields("Cafe2", "56.47", "84.96");
        app.on_save().unwrap();
        assert_eq!(app.store().len(), 1);
        assert_eq!(app.store().get(0).unwrap(), &Note::new("Cafe2", 56.47, 84.96));
        assert_eq!(stored(&app), r#"[{"text":"Cafe2","lat":56.47,"lng":84.96}]"#);

        app.on_note_selected(0).unwrap();
        assert!(app.on_delete().unwrap());
        assert!(app.store().is_empty());
        assert_eq!(stored(&app), "[]");
        assert!(app.ui().list().is_empty());
        assert_eq!(app.map().marker_count(), 0);
    }

    #[test]
    fn test_invalid_save_alerts_and_keeps_modal() {
        let mut app = app_with(MemoryStorage::new());

        let result = create(&mut app, "  ", "56.46", "84.95");
        assert!(matches!(
            result,
            Err(MapNotesError::Validation(ValidationError::EmptyText))
        ));
        assert_eq!(app.ui().alerts().len(), 1);
        assert!(app.ui().is_modal_open());
        assert_eq!(app.editor_state(), EditorState::Creating);
        assert!(app.store().is_empty());

        app.ui_mut().type_fields("Cafe", "lat", "84.95");
        assert!(app.on_save().is_err());
        assert_eq!(app.ui().alerts().len(), 2);
        assert!(app.store().is_empty());
        assert!(app.store().storage().get_item("notes").unwrap().is_none());
    }

    #[test]
    fn test_select_recenters_at_current_zoom() {
        let mut app = app_with(MemoryStorage::new());
        create(&mut app, "Moscow", "55.75", "37.62").unwrap();
        app.map_mut().set_view(LatLng::new(0.0, 0.0), 7);

        app.on_note_selected(0).unwrap();
        assert_eq!(app.map().center(), LatLng::new(55.75, 37.62));
        assert_eq!(app.map().zoom(), 7);
        assert_eq!(app.ui().fields().text, "Moscow");
    }

    #[test]
    fn test_select_out_of_range() {
        let mut app = app_with(MemoryStorage::new());
        assert!(matches!(
            app.on_note_selected(0),
            Err(MapNotesError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert_eq!(app.editor_state(), EditorState::Closed);
    }

    #[test]
    fn test_map_click_fills_open_form() {
        let mut app = app_with(MemoryStorage::new());

        app.on_map_click(LatLng::new(1.0, 2.0));
        assert_eq!(app.ui().fields().lat, "");

        app.on_add_clicked();
        app.ui_mut().type_fields("Bridge", "", "");
        app.on_map_click(LatLng::new(56.5, 84.9));
        assert_eq!(app.ui().fields().text, "Bridge");
        assert_eq!(app.ui().fields().lat, "56.500000");
        assert_eq!(app.ui().fields().lng, "84.900000");
        assert_eq!(app.editor_state(), EditorState::Creating);

        app.on_save().unwrap();
        assert_eq!(app.store().get(0).unwrap(), &Note::new("Bridge", 56.5, 84.9));
    }

    #[test]
    fn test_cancel_discards_form() {
        let mut app = app_with(MemoryStorage::new());
        app.on_add_clicked();
        app.ui_mut().type_fields("draft", "1", "1");
        app.on_cancel();

        assert!(!app.ui().is_modal_open());
        assert_eq!(app.editor_state(), EditorState::Closed);
        assert!(app.store().is_empty());
    }

    #[test]
    fn test_delete_without_editing_is_noop() {
        let mut app = app_with(MemoryStorage::new());
        create(&mut app, "Cafe", "56.46", "84.95").unwrap();

        assert!(!app.on_delete().unwrap());
        app.on_add_clicked();
        assert!(!app.on_delete().unwrap());
        assert_eq!(app.store().len(), 1);
    }

    #[test]
    fn test_move_end_keeps_list_and_toggles_markers() {
        let mut app = app_with(MemoryStorage::new());
        create(&mut app, "Cafe", "56.46", "84.95").unwrap();
        create(&mut app, "Moscow", "55.75", "37.62").unwrap();
        create(&mut app, "Park", "56.48", "84.99").unwrap();
        let list_before = app.ui().list().to_vec();
        assert_eq!(app.map().visible_popups(), vec!["Cafe", "Park"]);

        app.map_mut().set_view(LatLng::new(55.75, 37.62), 10);
        app.on_move_end();

        assert_eq!(app.ui().list(), list_before.as_slice());
        assert_eq!(app.map().visible_popups(), vec!["Moscow"]);
        assert_eq!(app.visible_indices(), vec![1]);
        assert_eq!(app.store().len(), 3);
    }
}
