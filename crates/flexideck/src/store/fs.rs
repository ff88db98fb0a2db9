use super::deck_store::DeckStore;
use super::fs_backend::FsBackend;
use std::path::{Path, PathBuf};

/// Production store: a `decks.json` file inside a data directory.
pub type FileStore = DeckStore<FsBackend>;

impl FileStore {
    /// Opens the store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DeckStore::with_backend(FsBackend::new(root))
    }

    pub fn root(&self) -> &Path {
        self.backend.root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Deck, Sides};
    use crate::store::fs_backend::DECKS_FILE;
    use crate::store::DataStore;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        assert!(store.list_decks().unwrap().is_empty());
    }

    #[test]
    fn writes_atomically_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));
        let mut deck = Deck::new("Spanish", Sides::Two);
        deck.new_card("Hola").set_front("Hola #greeting");
        store.save_deck(&deck).unwrap();

        assert!(store.root().join(DECKS_FILE).exists());
        for entry in fs::read_dir(store.root()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }

        let reopened = FileStore::new(store.root().to_path_buf());
        let loaded = reopened.get_deck(&deck.id).unwrap();
        assert_eq!(loaded, deck);
        assert!(loaded.is_linked());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DECKS_FILE), "{ not json").unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.list_decks().is_err());
    }
}
