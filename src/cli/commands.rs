use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::viewport::LatLng;

#[derive(Parser, Debug)]
#[command(name = "mapnotes")]
#[command(version, about = "Notes pinned to map coordinates")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding config.yaml and the stored notes
    #[arg(long, global = true, default_value = ".mapnotes")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory with a default config
    Init,

    /// Add a note
    Add {
        /// Note text
        #[arg(long)]
        text: String,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change an existing note; omitted fields keep their value
    Edit {
        /// Position of the note as shown by `list`
        index: usize,

        #[arg(long)]
        text: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Position of the note as shown by `list`
        index: usize,
    },

    /// List every note, marking the ones inside the configured view
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the notes inside a map view
    Visible {
        /// View center as "lat,lng" (defaults to the configured center)
        #[arg(long, allow_hyphen_values = true)]
        center: Option<LatLng>,

        /// Zoom level (defaults to the configured zoom)
        #[arg(long)]
        zoom: Option<u8>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
