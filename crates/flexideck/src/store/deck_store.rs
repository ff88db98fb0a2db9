use super::backend::StorageBackend;
use super::DataStore;
use crate::error::{DeckError, Result};
use crate::model::Deck;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

pub struct DeckStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> DeckStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    fn linked(deck: &Deck) -> Deck {
        let mut deck = deck.clone();
        deck.relink();
        deck
    }
}

impl<B: StorageBackend> DataStore for DeckStore<B> {
    fn list_decks(&self) -> Result<Vec<Deck>> {
        self.backend.load_decks()
    }

    fn get_deck(&self, id: &Uuid) -> Result<Deck> {
        self.backend
            .load_decks()?
            .into_iter()
            .find(|d| d.id == *id)
            .ok_or(DeckError::DeckNotFound(*id))
    }

    fn insert_decks(&mut self, decks: Vec<Deck>) -> Result<()> {
        if decks.is_empty() {
            return Ok(());
        }
        let mut stored = self.backend.load_decks()?;
        for (i, deck) in decks.iter().enumerate() {
            let clash = stored.iter().any(|d| d.id == deck.id)
                || decks[..i].iter().any(|d| d.id == deck.id);
            if clash {
                return Err(DeckError::Store(format!("Deck already exists: {}", deck.id)));
            }
        }

        let count = decks.len();
        stored.extend(decks.into_iter().map(|mut deck| {
            deck.relink();
            deck
        }));
        self.backend.save_decks(&stored)?;
        debug!(count, total = stored.len(), "inserted decks");
        Ok(())
    }

    fn save_deck(&mut self, deck: &Deck) -> Result<()> {
        let mut stored = self.backend.load_decks()?;
        match stored.iter_mut().find(|d| d.id == deck.id) {
            Some(existing) => *existing = Self::linked(deck),
            None => stored.push(Self::linked(deck)),
        }
        self.backend.save_decks(&stored)?;
        debug!(deck_id = %deck.id, cards = deck.len(), "saved deck");
        Ok(())
    }

    fn save_decks(&mut self, decks: &[Deck]) -> Result<()> {
        let mut stored = self.backend.load_decks()?;
        for deck in decks {
            let existing = stored
                .iter_mut()
                .find(|d| d.id == deck.id)
                .ok_or(DeckError::DeckNotFound(deck.id))?;
            *existing = Self::linked(deck);
        }
        self.backend.save_decks(&stored)?;
        debug!(count = decks.len(), "saved decks");
        Ok(())
    }

    fn delete_deck(&mut self, id: &Uuid) -> Result<Deck> {
        let mut stored = self.backend.load_decks()?;
        let pos = stored
            .iter()
            .position(|d| d.id == *id)
            .ok_or(DeckError::DeckNotFound(*id))?;
        let removed = stored.remove(pos);
        self.backend.save_decks(&stored)?;
        debug!(deck_id = %id, cards = removed.len(), "deleted deck");
        Ok(removed)
    }
}
