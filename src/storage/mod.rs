//! Key/value persistence in the shape of browser `localStorage`, and the note
//! store that mirrors the note collection into it.

mod file_storage;
mod note_store;

use std::collections::HashMap;

use crate::error::Result;

pub use file_storage::FileStorage;
pub use note_store::{load_all, NoteStore, DEFAULT_STORAGE_KEY};

/// String key to string value storage.
pub trait KeyValueStorage {
    /// Returns `Ok(None)` when the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Process-local storage, lost on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
