use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query::CardQuery;
use crate::store::DataStore;
use crate::tags::distinct_tags;
use uuid::Uuid;

pub fn decks<S: DataStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_decks(store.list_decks()?))
}

/// A deck's cards after sorting, filtering and search.
pub fn cards<S: DataStore>(store: &S, deck_id: &Uuid, query: &CardQuery) -> Result<CmdResult> {
    let deck = store.get_deck(deck_id)?;
    let listed: Vec<_> = crate::query::run(deck.cards(), query)
        .into_iter()
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() && !deck.is_empty() {
        result.add_message(CmdMessage::info("No cards match the current filters."));
    }
    Ok(result.with_listed_cards(listed))
}

/// Every tag used in a deck, ignoring filters.
pub fn tags<S: DataStore>(store: &S, deck_id: &Uuid) -> Result<CmdResult> {
    let deck = store.get_deck(deck_id)?;
    Ok(CmdResult::default().with_tags(distinct_tags(deck.cards())))
}
