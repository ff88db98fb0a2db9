use super::deck_store::DeckStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = DeckStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        DeckStore::with_backend(MemBackend::new())
    }

    /// Make every following write fail, to exercise error paths.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.backend.set_simulate_write_error(simulate);
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Card, Deck, Sides};
    use crate::store::DataStore;

    /// Deck "Spanish": Hola (unrated, 1-sided) then Adios (3 stars, 2-sided, #greeting).
    pub fn spanish_deck() -> Deck {
        let mut deck = Deck::new("Spanish", Sides::Two);
        deck.add_card(Card::new("Hola", Sides::One)).set_front("Hola");
        let adios = deck.add_card(Card::new("Adios", Sides::Two));
        adios.set_front("Adios #greeting");
        adios.set_back("Goodbye");
        adios.set_rating(3);
        deck
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_deck(mut self, deck: Deck) -> Self {
            self.store.save_deck(&deck).unwrap();
            self
        }

        pub fn with_spanish_deck(self) -> Self {
            self.with_deck(spanish_deck())
        }

        /// A deck of one-sided cards titled "Card 1" through "Card N".
        pub fn with_cards(self, name: &str, count: usize) -> Self {
            let mut deck = Deck::new(name, Sides::One);
            for i in 0..count {
                deck.new_card(format!("Card {}", i + 1))
                    .set_front(format!("Front of card {}", i + 1));
            }
            self.with_deck(deck)
        }

        /// The first stored deck with this name.
        pub fn deck(&self, name: &str) -> Deck {
            self.store
                .list_decks()
                .unwrap()
                .into_iter()
                .find(|d| d.name == name)
                .unwrap()
        }
    }
}
