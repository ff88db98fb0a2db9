use crate::commands::helpers::deck_of_card;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeckError, Result};
use crate::model::{Card, Sides};
use crate::store::DataStore;
use tracing::debug;
use uuid::Uuid;

/// Deck fields to change. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct DeckUpdate {
    pub name: Option<String>,
    pub new_cards_sides: Option<Sides>,
}

impl DeckUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn new_cards_sides(mut self, sides: Sides) -> Self {
        self.new_cards_sides = Some(sides);
        self
    }
}

/// Card fields to change. `None` leaves a field alone.
///
/// Sidedness is applied before the back, so switching to two sides and writing a
/// back in one update works.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub front: Option<String>,
    pub back: Option<String>,
    pub sides: Option<Sides>,
    pub rating: Option<u8>,
    pub completed: Option<bool>,
}

impl CardUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn front(mut self, front: impl Into<String>) -> Self {
        self.front = Some(front.into());
        self
    }

    pub fn back(mut self, back: impl Into<String>) -> Self {
        self.back = Some(back.into());
        self
    }

    pub fn sides(mut self, sides: Sides) -> Self {
        self.sides = Some(sides);
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    fn apply(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.set_title(title);
        }
        if let Some(front) = self.front {
            card.set_front(front);
        }
        if let Some(sides) = self.sides {
            card.set_sides(sides);
        }
        if let Some(back) = self.back {
            card.set_back(back);
        }
        if let Some(rating) = self.rating {
            card.set_rating(rating);
        }
        if let Some(completed) = self.completed {
            card.set_completed(completed);
        }
    }
}

pub fn deck<S: DataStore>(store: &mut S, deck_id: &Uuid, update: DeckUpdate) -> Result<CmdResult> {
    let mut deck = store.get_deck(deck_id)?;
    if let Some(name) = update.name {
        deck.name = name;
    }
    if let Some(sides) = update.new_cards_sides {
        deck.new_cards_sides = sides;
    }
    store.save_deck(&deck)?;
    debug!(deck_id = %deck.id, "updated deck");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deck updated: {}", deck.name)));
    Ok(result.with_affected_decks(vec![deck]))
}

pub fn card<S: DataStore>(store: &mut S, card_id: &Uuid, update: CardUpdate) -> Result<CmdResult> {
    edit_card(store, card_id, |card| update.apply(card))
}

/// Flips a card between completed and not completed.
pub fn toggle_completion<S: DataStore>(store: &mut S, card_id: &Uuid) -> Result<CmdResult> {
    edit_card(store, card_id, Card::toggle_completed)
}

fn edit_card<S, F>(store: &mut S, card_id: &Uuid, edit: F) -> Result<CmdResult>
where
    S: DataStore,
    F: FnOnce(&mut Card),
{
    let mut deck = deck_of_card(store, card_id)?;
    let card = deck
        .card_mut(card_id)
        .ok_or(DeckError::CardNotFound(*card_id))?;
    edit(card);
    let card = card.clone();
    store.save_deck(&deck)?;
    debug!(deck_id = %deck.id, card_id = %card.id, "updated card");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Card updated: {}", card.title)));
    Ok(result.with_affected_cards(vec![card]))
}
