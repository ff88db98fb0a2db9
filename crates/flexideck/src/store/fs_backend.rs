use super::backend::StorageBackend;
use crate::error::{DeckError, Result};
use crate::model::Deck;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DECKS_FILE: &str = "decks.json";

/// Stores every deck in one pretty-printed JSON file.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn decks_file(&self) -> PathBuf {
        self.root.join(DECKS_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DeckError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_decks(&self) -> Result<Vec<Deck>> {
        let data_file = self.decks_file();
        if !data_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(data_file).map_err(DeckError::Io)?;
        // Deck deserialization re-links every card.
        let decks: Vec<Deck> =
            serde_json::from_str(&content).map_err(DeckError::Serialization)?;
        Ok(decks)
    }

    fn save_decks(&self, decks: &[Deck]) -> Result<()> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(decks).map_err(DeckError::Serialization)?;

        let tmp_file = self.root.join(format!(".decks-{}.tmp", Uuid::new_v4()));
        let written =
            fs::write(&tmp_file, content).and_then(|_| fs::rename(&tmp_file, self.decks_file()));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_file);
            return Err(DeckError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.decks_file()
    }
}
