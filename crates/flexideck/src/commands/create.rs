use crate::commands::helpers::name_or_default;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Deck, Sides, DEFAULT_CARD_TITLE, DEFAULT_DECK_NAME};
use crate::store::DataStore;
use tracing::info;
use uuid::Uuid;

/// Creates an empty deck. A missing or blank name becomes "New Deck".
pub fn deck<S: DataStore>(store: &mut S, name: Option<String>, sides: Sides) -> Result<CmdResult> {
    let deck = Deck::new(name_or_default(name, DEFAULT_DECK_NAME), sides);
    store.save_deck(&deck)?;
    info!(deck_id = %deck.id, name = %deck.name, "created deck");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deck created: {}", deck.name)));
    Ok(result.with_affected_decks(vec![deck]))
}

/// Appends a new card to a deck, using the deck's sidedness for new cards.
pub fn card<S: DataStore>(store: &mut S, deck_id: &Uuid, title: Option<String>) -> Result<CmdResult> {
    let mut deck = store.get_deck(deck_id)?;
    let card = deck
        .new_card(name_or_default(title, DEFAULT_CARD_TITLE))
        .clone();
    store.save_deck(&deck)?;
    info!(deck_id = %deck.id, card_id = %card.id, "created card");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Card created in {}: {}",
        deck.name, card.title
    )));
    Ok(result.with_affected_cards(vec![card]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeckError;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn creates_named_deck() {
        let mut store = InMemoryStore::new();
        let result = deck(&mut store, Some("Spanish".into()), Sides::Two).unwrap();

        let created = &result.affected_decks[0];
        assert_eq!(created.name, "Spanish");
        assert_eq!(created.new_cards_sides, Sides::Two);
        assert!(created.is_empty());
        assert_eq!(store.list_decks().unwrap().len(), 1);
        assert!(result.messages[0].content.contains("Spanish"));
    }

    #[test]
    fn unnamed_deck_gets_default_name() {
        let mut store = InMemoryStore::new();
        let result = deck(&mut store, None, Sides::One).unwrap();
        assert_eq!(result.affected_decks[0].name, DEFAULT_DECK_NAME);
    }

    #[test]
    fn card_uses_deck_sidedness_and_is_appended() {
        let mut store = InMemoryStore::new();
        let deck_id = deck(&mut store, Some("D".into()), Sides::Two).unwrap().affected_decks[0].id;

        card(&mut store, &deck_id, Some("First".into())).unwrap();
        let second = card(&mut store, &deck_id, None).unwrap().affected_cards[0].clone();

        assert_eq!(second.title, DEFAULT_CARD_TITLE);
        assert_eq!(second.sides(), Sides::Two);
        assert_eq!(second.deck_id(), Some(deck_id));

        let stored = store.get_deck(&deck_id).unwrap();
        let titles: Vec<&str> = stored.cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["First", DEFAULT_CARD_TITLE]);
    }

    #[test]
    fn card_in_missing_deck_fails() {
        let mut store = InMemoryStore::new();
        let missing = Uuid::new_v4();
        assert!(matches!(
            card(&mut store, &missing, None),
            Err(DeckError::DeckNotFound(_))
        ));
    }
}
