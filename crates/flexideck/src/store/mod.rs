//! # Storage Layer
//!
//! This module defines the storage abstraction for flexideck. The [`DataStore`] trait
//! lets the command layer work against different storage backends.
//!
//! ## Unit of Storage
//!
//! A deck is stored as a whole, cards nested inside it. There is no separate card
//! table: the deck's card list *is* its membership, so a card can never name a deck
//! that does not hold it. Deleting a deck therefore deletes its cards with it.
//!
//! ## Atomicity
//!
//! Every write replaces the full deck list in one backend call, so a multi-deck
//! operation (importing a bulk file, moving a card between decks) either lands
//! completely or not at all.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production store, a `decks.json` file in the data directory.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── decks.json          # Every deck with its cards, in creation order
//! └── preferences.toml    # User preferences (see crate::config)
//! ```

use crate::error::Result;
use crate::model::Deck;
use uuid::Uuid;

pub mod backend;
pub mod deck_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

/// Abstract interface for deck storage.
///
/// Decks come back in the order they were first inserted. Every returned deck has
/// its cards linked to it.
pub trait DataStore {
    /// All decks, in insertion order.
    fn list_decks(&self) -> Result<Vec<Deck>>;

    /// Get a deck by ID
    fn get_deck(&self, id: &Uuid) -> Result<Deck>;

    /// Insert new decks. Nothing is inserted if any of them fails.
    fn insert_decks(&mut self, decks: Vec<Deck>) -> Result<()>;

    /// Save a deck (create or update)
    fn save_deck(&mut self, deck: &Deck) -> Result<()>;

    /// Update several existing decks in one write.
    fn save_decks(&mut self, decks: &[Deck]) -> Result<()>;

    /// Delete a deck and its cards, returning what was removed.
    fn delete_deck(&mut self, id: &Uuid) -> Result<Deck>;
}
