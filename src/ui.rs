//! The form, list and alert surface the workflow drives.

use serde::Serialize;

use crate::editor::FormFields;

/// One row of the side list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub index: usize,
    pub text: String,
    pub lat: f64,
    pub lng: f64,
}

pub trait NoteUi {
    fn show_modal(&mut self, title: &str, show_delete: bool);

    fn hide_modal(&mut self);

    fn set_fields(&mut self, fields: &FormFields);

    /// What the user has typed into the form.
    fn fields(&self) -> FormFields;

    /// Blocking notice shown to the user.
    fn alert(&mut self, message: &str);

    fn clear_list(&mut self);

    fn push_list_entry(&mut self, entry: ListEntry);
}

/// Modal as last shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub show_delete: bool,
}

/// Records everything pushed to it; the form can be typed into via [`HeadlessUi::type_fields`].
#[derive(Debug, Default)]
pub struct HeadlessUi {
    modal: Option<ModalView>,
    fields: FormFields,
    alerts: Vec<String>,
    list: Vec<ListEntry>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> Option<&ModalView> {
        self.modal.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn type_fields(&mut self, text: &str, lat: &str, lng: &str) {
        self.fields = FormFields {
            text: text.to_string(),
            lat: lat.to_string(),
            lng: lng.to_string(),
        };
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn list(&self) -> &[ListEntry] {
        &self.list
    }
}

impl NoteUi for HeadlessUi {
    fn show_modal(&mut self, title: &str, show_delete: bool) {
        self.modal = Some(ModalView {
            title: title.to_string(),
            show_delete,
        });
    }

    fn hide_modal(&mut self) {
        self.modal = None;
    }

    fn set_fields(&mut self, fields: &FormFields) {
        self.fields = fields.clone();
    }

    fn fields(&self) -> FormFields {
        self.fields.clone()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn clear_list(&mut self) {
        self.list.clear();
    }

    fn push_list_entry(&mut self, entry: ListEntry) {
        self.list.push(entry);
    }
}
