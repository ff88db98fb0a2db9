use super::backend::StorageBackend;
use crate::error::{DeckError, Result};
use crate::model::Deck;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since flexideck is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    decks: RefCell<Vec<Deck>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn load_decks(&self) -> Result<Vec<Deck>> {
        Ok(self.decks.borrow().clone())
    }

    fn save_decks(&self, decks: &[Deck]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(DeckError::Store("Simulated write error".to_string()));
        }
        *self.decks.borrow_mut() = decks.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://decks")
    }
}
