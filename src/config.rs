//! Configuration loaded from `config.yaml` inside the data directory.
//!
//! Missing files and missing fields fall back to defaults; a file that does not
//! parse is reported and replaced by the defaults so the app can still start.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::map::TileLayer;
use crate::storage::DEFAULT_STORAGE_KEY;
use crate::viewport::LatLng;

pub const CONFIG_FILE: &str = "config.yaml";

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_initial_center() -> LatLng {
    LatLng::new(56.463610, 84.957846)
}

fn default_initial_zoom() -> u8 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Pixel size of the map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage key the note snapshot is written under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_initial_center")]
    pub initial_center: LatLng,
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: u8,
    #[serde(default)]
    pub viewport: ViewportSize,
    #[serde(default)]
    pub tile_layer: TileLayer,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            initial_center: default_initial_center(),
            initial_zoom: default_initial_zoom(),
            viewport: ViewportSize::default(),
            tile_layer: TileLayer::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn parse(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load `config.yaml` from `dir`, or defaults.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match Self::parse(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "invalid config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(dir.join(CONFIG_FILE), yaml)?;
        Ok(())
    }
}
