//! Export of decks as deck files.
//!
//! A deck is encoded in full before anything reaches the sink, so an encoding
//! failure never leaves a partial file behind. Sinks that write to disk do so
//! atomically (see [`crate::files::DirectorySink`]).

use crate::codec::{self, DECK_CONTENT_TYPE, DECK_FILE_EXTENSION};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeckError, Result};
use crate::files::{ExportFile, FileSink};
use crate::model::Deck;
use crate::store::DataStore;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

/// File stem used for a deck whose name leaves nothing after sanitizing.
pub const FALLBACK_FILE_STEM: &str = "Deck";

pub const ALL_DECKS_FILE_STEM: &str = "FlexiDeck_All_Decks";

/// Replaces characters that are unsafe in file names with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Suggested file name for a deck, e.g. `Spanish.flexideck`.
pub fn file_name_for(deck_name: &str) -> String {
    let stem = sanitize_filename(deck_name);
    let stem = if stem.is_empty() {
        FALLBACK_FILE_STEM
    } else {
        stem.as_str()
    };
    format!("{}.{}", stem, DECK_FILE_EXTENSION)
}

/// Encodes one deck into a ready-to-save file.
pub fn prepare_deck(deck: &Deck) -> Result<ExportFile> {
    Ok(ExportFile {
        file_name: file_name_for(&deck.name),
        content_type: DECK_CONTENT_TYPE,
        data: codec::encode_deck(deck)?,
    })
}

/// Encodes every deck into one bulk file.
pub fn prepare_all(decks: &[Deck]) -> Result<ExportFile> {
    Ok(ExportFile {
        file_name: format!("{}.{}", ALL_DECKS_FILE_STEM, DECK_FILE_EXTENSION),
        content_type: DECK_CONTENT_TYPE,
        data: codec::encode_decks(decks)?,
    })
}

fn deliver<K: FileSink + ?Sized>(sink: &mut K, file: &ExportFile) -> Result<PathBuf> {
    sink.save(file).map_err(|source| {
        warn!(file = %file.file_name, error = %source, "export could not be saved");
        DeckError::FileIo {
            path: PathBuf::from(&file.file_name),
            source,
        }
    })
}

pub fn deck<S, K>(store: &S, deck_id: &Uuid, sink: &mut K) -> Result<CmdResult>
where
    S: DataStore,
    K: FileSink + ?Sized,
{
    let deck = store.get_deck(deck_id)?;
    let file = prepare_deck(&deck)?;
    let saved = deliver(sink, &file)?;
    info!(deck_id = %deck.id, path = %saved.display(), "exported deck");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} to {}",
        deck.name,
        saved.display()
    )));
    Ok(result.with_affected_decks(vec![deck]))
}

pub fn all_decks<S, K>(store: &S, sink: &mut K) -> Result<CmdResult>
where
    S: DataStore,
    K: FileSink + ?Sized,
{
    let decks = store.list_decks()?;
    let file = prepare_all(&decks)?;
    let saved = deliver(sink, &file)?;
    info!(count = decks.len(), path = %saved.display(), "exported all decks");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} deck{} to {}",
        decks.len(),
        if decks.len() == 1 { "" } else { "s" },
        saved.display()
    )));
    Ok(result.with_affected_decks(decks))
}
