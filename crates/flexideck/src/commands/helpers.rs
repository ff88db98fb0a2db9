use crate::error::{DeckError, Result};
use crate::model::Deck;
use crate::store::DataStore;
use uuid::Uuid;

/// Finds the deck holding a card.
pub fn deck_of_card<S: DataStore>(store: &S, card_id: &Uuid) -> Result<Deck> {
    store
        .list_decks()?
        .into_iter()
        .find(|deck| deck.contains_card(card_id))
        .ok_or(DeckError::CardNotFound(*card_id))
}

/// Falls back to `default` when `name` is missing or blank.
pub fn name_or_default(name: Option<String>, default: &str) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => default.to_string(),
    }
}
