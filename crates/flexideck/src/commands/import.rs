//! Import of deck files.
//!
//! Each file is handled on its own: take read access, read, decode, name, insert.
//! A file that fails at any step is recorded and the batch moves on. A file's decks
//! go into the store in a single insert, so a file is imported whole or not at all.

use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeckError, Result};
use crate::files::{FileSource, ScopedAccess};
use crate::model::{Deck, DEFAULT_DECK_NAME};
use crate::store::DataStore;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Name a single-deck file's deck after the file instead of its stored name.
    pub use_file_name_as_deck_name: bool,
}

#[derive(Debug)]
pub struct ImportFailure {
    pub path: PathBuf,
    pub error: DeckError,
}

impl ImportFailure {
    /// User-facing description of the failure.
    pub fn message(&self) -> String {
        match &self.error {
            DeckError::FileAccess(_) => self.error.to_string(),
            error => format!(
                "The deck at {} couldn't be imported: {}",
                self.path.display(),
                error
            ),
        }
    }
}

/// Outcome of an import batch, in processing order.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<Deck>,
    pub failures: Vec<ImportFailure>,
    /// Files that decoded cleanly but held no decks.
    pub empty_files: Vec<PathBuf>,
}

impl ImportReport {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    /// One error message per failed file, a warning per empty file, then a success
    /// count if anything landed.
    pub fn into_cmd_result(self) -> CmdResult {
        let mut result = CmdResult::default();
        for failure in &self.failures {
            result.add_message(CmdMessage::error(failure.message()));
        }
        for path in &self.empty_files {
            result.add_message(CmdMessage::warning(format!(
                "No decks found in {}",
                path.display()
            )));
        }
        let count = self.imported.len();
        if count > 0 {
            result.add_message(CmdMessage::success(format!(
                "Imported {} deck{}",
                count,
                if count == 1 { "" } else { "s" }
            )));
        }
        result.with_affected_decks(self.imported)
    }
}

pub fn run<S, F>(store: &mut S, source: &F, paths: &[PathBuf], options: ImportOptions) -> ImportReport
where
    S: DataStore,
    F: FileSource + ?Sized,
{
    let mut report = ImportReport::default();

    for path in paths {
        match import_file(store, source, path, options) {
            Ok(decks) if decks.is_empty() => {
                warn!(path = %path.display(), "deck file holds no decks");
                report.empty_files.push(path.clone());
            }
            Ok(decks) => {
                info!(path = %path.display(), decks = decks.len(), "imported deck file");
                report.imported.extend(decks);
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "deck file import failed");
                report.failures.push(ImportFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    report
}

fn import_file<S, F>(store: &mut S, source: &F, path: &Path, options: ImportOptions) -> Result<Vec<Deck>>
where
    S: DataStore,
    F: FileSource + ?Sized,
{
    let bytes = {
        let access = ScopedAccess::acquire(source, path)?;
        access.read()?
    };

    let mut decks = codec::decode_file(&bytes)?;
    let file_stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty());

    let single = decks.len() == 1;
    for deck in &mut decks {
        let rename = single && options.use_file_name_as_deck_name;
        if rename || deck.name.trim().is_empty() {
            deck.name = file_stem
                .clone()
                .unwrap_or_else(|| DEFAULT_DECK_NAME.to_string());
        }
    }

    store.insert_decks(decks.clone())?;
    Ok(decks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_deck, encode_decks};
    use crate::commands::MessageLevel;
    use crate::files::testing::MemoryFiles;
    use crate::model::Sides;
    use crate::store::memory::fixtures::spanish_deck;
    use crate::store::memory::InMemoryStore;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn imports_exported_deck() {
        let original = spanish_deck();
        let files = MemoryFiles::new().with_file("/in/Spanish.flexideck", encode_deck(&original).unwrap());
        let mut store = InMemoryStore::new();

        let report = run(&mut store, &files, &paths(&["/in/Spanish.flexideck"]), ImportOptions::default());
        assert!(report.failures.is_empty());

        let decks = store.list_decks().unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].name, "Spanish");
        assert_eq!(decks[0].len(), 2);
        for (got, want) in decks[0].cards().iter().zip(original.cards()) {
            assert_eq!(got.front(), want.front());
            assert_eq!(got.back(), want.back());
            assert_eq!(got.tags(), want.tags());
            assert_eq!(got.rating(), want.rating());
            assert_eq!(got.completed, want.completed);
        }
        assert_eq!(files.outstanding(), 0);
    }

    #[test]
    fn corrupt_file_does_not_stop_the_batch() {
        let good_a = encode_deck(&Deck::new("A", Sides::One)).unwrap();
        let good_c = encode_deck(&spanish_deck()).unwrap();
        let files = MemoryFiles::new()
            .with_file("/a.flexideck", good_a)
            .with_file("/b.flexideck", b"{ \"name\": \"B\", \"cards\": [ {".to_vec())
            .with_file("/c.flexideck", good_c);
        let mut store = InMemoryStore::new();

        let report = run(
            &mut store,
            &files,
            &paths(&["/a.flexideck", "/b.flexideck", "/c.flexideck"]),
            ImportOptions::default(),
        );

        assert_eq!(report.imported_count(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("/b.flexideck"));
        assert!(matches!(report.failures[0].error, DeckError::Decode(_)));
        assert_eq!(store.list_decks().unwrap().len(), 2);

        let result = report.into_cmd_result();
        assert_eq!(result.messages.len(), 2);
        assert!(result.messages[0].content.contains("/b.flexideck"));
        assert_eq!(result.messages[1].content, "Imported 2 decks");
        assert_eq!(files.outstanding(), 0);
    }

    #[test]
    fn denied_and_missing_files_are_reported() {
        let files = MemoryFiles::new()
            .with_file("/locked.flexideck", b"{}".to_vec())
            .with_denied("/locked.flexideck");
        let mut store = InMemoryStore::new();

        let report = run(
            &mut store,
            &files,
            &paths(&["/locked.flexideck", "/gone.flexideck"]),
            ImportOptions::default(),
        );

        assert_eq!(report.failures.len(), 2);
        assert!(matches!(report.failures[0].error, DeckError::FileAccess(_)));
        assert!(matches!(report.failures[1].error, DeckError::FileIo { .. }));
        assert!(report.failures[0].message().contains("access to the file was denied"));

        let result = report.into_cmd_result();
        assert!(result.messages.iter().all(|m| m.level == MessageLevel::Error));
        assert!(store.list_decks().unwrap().is_empty());
        assert_eq!(files.outstanding(), 0);
    }

    #[test]
    fn renames_to_file_name_when_asked() {
        let files = MemoryFiles::new()
            .with_file("/x/Vocabulario.flexideck", encode_deck(&spanish_deck()).unwrap());
        let mut store = InMemoryStore::new();
        let options = ImportOptions {
            use_file_name_as_deck_name: true,
        };

        run(&mut store, &files, &paths(&["/x/Vocabulario.flexideck"]), options);
        assert_eq!(store.list_decks().unwrap()[0].name, "Vocabulario");
    }

    #[test]
    fn bulk_files_keep_their_names() {
        let bytes = encode_decks(&[spanish_deck(), Deck::new("Numbers", Sides::One)]).unwrap();
        let files = MemoryFiles::new().with_file("/all.flexideck", bytes);
        let mut store = InMemoryStore::new();
        let options = ImportOptions {
            use_file_name_as_deck_name: true,
        };

        let report = run(&mut store, &files, &paths(&["/all.flexideck"]), options);
        let names: Vec<String> = report.imported.iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["Spanish", "Numbers"]);
    }

    #[test]
    fn unnamed_deck_takes_file_name() {
        let files = MemoryFiles::new().with_file("/Verbs.flexideck", br#"{ "cards": [] }"#.to_vec());
        let mut store = InMemoryStore::new();

        run(&mut store, &files, &paths(&["/Verbs.flexideck"]), ImportOptions::default());
        assert_eq!(store.list_decks().unwrap()[0].name, "Verbs");
    }

    #[test]
    fn store_failure_is_a_per_file_failure() {
        let files = MemoryFiles::new().with_file("/a.flexideck", encode_deck(&spanish_deck()).unwrap());
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);

        let report = run(&mut store, &files, &paths(&["/a.flexideck"]), ImportOptions::default());
        assert_eq!(report.imported_count(), 0);
        assert!(matches!(report.failures[0].error, DeckError::Store(_)));

        let result = report.into_cmd_result();
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn empty_bulk_file_is_a_warning() {
        let good = encode_deck(&spanish_deck()).unwrap();
        let files = MemoryFiles::new()
            .with_file("/none.flexideck", br#"{ "decks": [] }"#.to_vec())
            .with_file("/Spanish.flexideck", good);
        let mut store = InMemoryStore::new();

        let report = run(
            &mut store,
            &files,
            &paths(&["/none.flexideck", "/Spanish.flexideck"]),
            ImportOptions::default(),
        );
        assert!(report.failures.is_empty());
        assert_eq!(report.empty_files, vec![PathBuf::from("/none.flexideck")]);
        assert_eq!(report.imported_count(), 1);

        let result = report.into_cmd_result();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("/none.flexideck"));
        assert_eq!(result.messages[1].content, "Imported 1 deck");
        assert_eq!(store.list_decks().unwrap().len(), 1);
        assert_eq!(files.outstanding(), 0);
    }

    #[test]
    fn empty_batch_reports_nothing() {
        let mut store = InMemoryStore::new();
        let report = run(&mut store, &MemoryFiles::new(), &[], ImportOptions::default());
        assert!(report.into_cmd_result().messages.is_empty());
    }
}
