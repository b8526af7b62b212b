pub mod app;
pub mod cli;
pub mod config;
pub mod editor;
pub mod entity;
pub mod error;
pub mod map;
pub mod presenter;
pub mod storage;
pub mod ui;
pub mod viewport;

pub use app::App;
pub use config::AppConfig;
pub use entity::{Note, NoteId};
pub use error::{MapNotesError, Result};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, NoteStore};
pub use viewport::{LatLng, LatLngBounds};
