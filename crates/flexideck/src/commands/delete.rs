use crate::commands::helpers::deck_of_card;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeckError, Result};
use crate::store::DataStore;
use tracing::info;
use uuid::Uuid;

/// Deletes a deck together with its cards.
pub fn deck<S: DataStore>(store: &mut S, deck_id: &Uuid) -> Result<CmdResult> {
    let removed = store.delete_deck(deck_id)?;
    info!(deck_id = %removed.id, cards = removed.len(), "deleted deck");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deck deleted: {} ({} cards)",
        removed.name,
        removed.len()
    )));
    Ok(result.with_affected_decks(vec![removed]))
}

pub fn all_decks<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let decks = store.list_decks()?;
    let mut removed = Vec::with_capacity(decks.len());
    for deck in decks {
        removed.push(store.delete_deck(&deck.id)?);
    }
    info!(count = removed.len(), "deleted all decks");

    let mut result = CmdResult::default();
    if removed.is_empty() {
        result.add_message(CmdMessage::info("No decks to delete."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Deleted {} deck{}",
            removed.len(),
            if removed.len() == 1 { "" } else { "s" }
        )));
    }
    Ok(result.with_affected_decks(removed))
}

/// Removes a card from its deck.
pub fn card<S: DataStore>(store: &mut S, card_id: &Uuid) -> Result<CmdResult> {
    let mut deck = deck_of_card(store, card_id)?;
    let removed = deck
        .remove_card(card_id)
        .ok_or(DeckError::CardNotFound(*card_id))?;
    store.save_deck(&deck)?;
    info!(deck_id = %deck.id, card_id = %removed.id, "deleted card");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Card deleted: {}", removed.title)));
    Ok(result
        .with_affected_cards(vec![removed])
        .with_affected_decks(vec![deck]))
}

/// Empties a deck, keeping the deck itself.
pub fn all_cards<S: DataStore>(store: &mut S, deck_id: &Uuid) -> Result<CmdResult> {
    let mut deck = store.get_deck(deck_id)?;
    let removed = deck.take_cards();
    store.save_deck(&deck)?;
    info!(deck_id = %deck.id, count = removed.len(), "deleted all cards");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted {} card{} from {}",
        removed.len(),
        if removed.len() == 1 { "" } else { "s" },
        deck.name
    )));
    Ok(result
        .with_affected_cards(removed)
        .with_affected_decks(vec![deck]))
}
