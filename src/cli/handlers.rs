use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::app::App;
use crate::config::{AppConfig, CONFIG_FILE};
use crate::entity::Note;
use crate::error::{MapNotesError, Result};
use crate::map::{HeadlessMap, MapWidget};
use crate::storage::{FileStorage, KeyValueStorage};
use crate::ui::{HeadlessUi, NoteUi};
use crate::viewport::{is_visible, LatLng};

type CliApp = App<FileStorage, HeadlessMap, HeadlessUi>;

/// A note as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteRow {
    pub index: usize,
    pub text: String,
    pub lat: f64,
    pub lng: f64,
    pub visible: bool,
}

impl NoteRow {
    fn new(index: usize, note: &Note, visible: bool) -> Self {
        Self {
            index,
            text: note.text.clone(),
            lat: note.lat,
            lng: note.lng,
            visible,
        }
    }
}

/// Build the app over an initialized data directory.
///
/// A directory only counts as initialized once `init` has written its config.
pub fn open_app(data_dir: &Path) -> Result<CliApp> {
    let storage = FileStorage::open(data_dir)?;
    if !data_dir.join(CONFIG_FILE).is_file() {
        return Err(MapNotesError::NotInitialized);
    }
    let config = AppConfig::load(data_dir);
    let map = HeadlessMap::new(config.viewport.width, config.viewport.height);
    Ok(App::new(&config, storage, map, HeadlessUi::new()))
}

pub fn handle_init(data_dir: &Path) -> Result<()> {
    let mut storage = FileStorage::init(data_dir)?;
    let config = AppConfig::default();
    config.save(data_dir)?;
    storage.set_item(&config.storage_key, "[]")?;

    println!("Initialized mapnotes in {}", data_dir.display());
    Ok(())
}

pub fn handle_add(data_dir: &Path, text: String, lat: String, lng: String, json: bool) -> Result<()> {
    let mut app = open_app(data_dir)?;

    app.on_add_clicked();
    app.ui_mut().type_fields(&text, &lat, &lng);
    let index = app.on_save()?;
    info!(index, "note added");

    print_saved(&app, "Added", index, json)
}

pub fn handle_edit(
    data_dir: &Path,
    index: usize,
    text: Option<String>,
    lat: Option<String>,
    lng: Option<String>,
    json: bool,
) -> Result<()> {
    let mut app = open_app(data_dir)?;

    app.on_note_selected(index)?;
    let current = app.ui().fields();
    let text = text.unwrap_or(current.text);
    let lat = lat.unwrap_or(current.lat);
    let lng = lng.unwrap_or(current.lng);
    app.ui_mut().type_fields(&text, &lat, &lng);
    let index = app.on_save()?;
    info!(index, "note updated");

    print_saved(&app, "Updated", index, json)
}

pub fn handle_delete(data_dir: &Path, index: usize) -> Result<()> {
    let mut app = open_app(data_dir)?;

    app.on_note_selected(index)?;
    let note = app.store().get(index).cloned();
    if !app.on_delete()? {
        return Err(MapNotesError::InvalidArgument(format!(
            "note {} could not be deleted",
            index
        )));
    }

    if let Some(note) = note {
        println!("Deleted note {:03} - {}", index, note.text);
    }
    Ok(())
}

pub fn handle_list(data_dir: &Path, json: bool) -> Result<()> {
    let app = open_app(data_dir)?;
    let rows = rows(&app, false);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No notes found.");
    } else {
        println!("Notes ({} in view):\n", rows.iter().filter(|r| r.visible).count());
        for row in &rows {
            print_row(row);
        }
    }
    Ok(())
}

pub fn handle_visible(
    data_dir: &Path,
    center: Option<LatLng>,
    zoom: Option<u8>,
    json: bool,
) -> Result<()> {
    let mut app = open_app(data_dir)?;

    let center = center.unwrap_or_else(|| app.map().center());
    let zoom = zoom.unwrap_or_else(|| app.map().zoom());
    app.map_mut().set_view(center, zoom);
    app.on_move_end();

    let rows = rows(&app, true);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No notes in view {}.", app.map().bounds());
    } else {
        println!("Notes in view {}:\n", app.map().bounds());
        for row in &rows {
            print_row(row);
        }
    }
    Ok(())
}

fn rows(app: &CliApp, visible_only: bool) -> Vec<NoteRow> {
    let bounds = app.map().bounds();
    app.store()
        .notes()
        .iter()
        .enumerate()
        .map(|(index, note)| NoteRow::new(index, note, is_visible(&bounds, note)))
        .filter(|row| !visible_only || row.visible)
        .collect()
}

fn print_row(row: &NoteRow) {
    let marker = if row.visible { "*" } else { " " };
    println!(
        "  {} {:03} {} ({}, {})",
        marker, row.index, row.text, row.lat, row.lng
    );
}

fn print_saved(app: &CliApp, verb: &str, index: usize, json: bool) -> Result<()> {
    let Some(note) = app.store().get(index) else {
        return Err(MapNotesError::IndexOutOfRange {
            index,
            len: app.store().len(),
        });
    };
    let visible = is_visible(&app.map().bounds(), note);

    if json {
        let row = NoteRow::new(index, note, visible);
        println!("{}", serde_json::to_string_pretty(&row)?);
    } else {
        println!(
            "{} note {:03} - {} ({}, {})",
            verb, index, note.text, note.lat, note.lng
        );
    }
    Ok(())
}
