//! # Locations on Disk
//!
//! A host normally opens flexideck with [`initialize`], which picks the data directory,
//! loads preferences from it and wires a file-backed API:
//!
//! ```text
//! <data dir>/
//!   decks.json         # every deck with its cards
//!   preferences.toml   # user preferences
//! ```
//!
//! The data directory is, in order of precedence:
//! 1. the `data_override` argument, used as-is
//! 2. the `FLEXIDECK_DATA` environment variable
//! 3. the OS-appropriate data directory (via the `directories` crate)

use crate::api::FlexiDeckApi;
use crate::config::Preferences;
use crate::error::{DeckError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::info;

/// Environment variable that moves the data directory, mostly for tests.
pub const DATA_DIR_ENV: &str = "FLEXIDECK_DATA";

/// The default data directory for this user.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "flexideck", "flexideck")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DeckError::Config("Could not determine data dir".to_string()))
}

/// Opens the file-backed API over the chosen data directory.
pub fn initialize(data_override: Option<PathBuf>) -> Result<FlexiDeckApi<FileStore>> {
    let data_dir = match data_override {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let preferences = Preferences::load(&data_dir)?;
    info!(data_dir = %data_dir.display(), "opened flexideck data directory");

    Ok(FlexiDeckApi::new(FileStore::new(data_dir), preferences))
}
