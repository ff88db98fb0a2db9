//! Moving a card between decks.
//!
//! The card leaves its old deck's list and is appended to the target's. Both decks
//! are written in one store call, so the card is never in two decks or in none.

use crate::commands::helpers::deck_of_card;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeckError, Result};
use crate::store::DataStore;
use tracing::info;
use uuid::Uuid;

pub fn run<S: DataStore>(store: &mut S, card_id: &Uuid, target_deck_id: &Uuid) -> Result<CmdResult> {
    let mut source = deck_of_card(store, card_id)?;
    let mut target = store.get_deck(target_deck_id)?;

    let mut result = CmdResult::default();
    if source.id == target.id {
        result.add_message(CmdMessage::info(format!(
            "Card is already in {}",
            target.name
        )));
        return Ok(result);
    }

    let card = source
        .remove_card(card_id)
        .ok_or(DeckError::CardNotFound(*card_id))?;
    let moved = target.add_card(card).clone();
    store.save_decks(&[source.clone(), target.clone()])?;
    info!(card_id = %moved.id, from = %source.id, to = %target.id, "moved card");

    result.add_message(CmdMessage::success(format!(
        "Moved {} from {} to {}",
        moved.title, source.name, target.name
    )));
    Ok(result
        .with_affected_cards(vec![moved])
        .with_affected_decks(vec![source, target]))
}
