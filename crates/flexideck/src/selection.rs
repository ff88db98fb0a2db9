//! # Selection Consistency
//!
//! The UI holds a "selected deck" and a "selected card", plus the query that shapes
//! the card list. [`Selection`] keeps the three consistent:
//!
//! - Changing the selected deck clears the selected card.
//! - After any query change the selected card must still be in the result set,
//!   otherwise it is cleared.
//! - A tag filter naming a tag no card in the deck carries any more resets to off.
//! - Deleting the selected card clears it; deleting the selected deck clears both.
//!
//! Every transition runs synchronously inside the call that caused it and reports
//! what it changed as a [`SelectionChange`]. Callers that mutate decks behind the
//! selection's back call [`Selection::reconcile`] with the fresh deck afterwards.

use crate::model::{Card, Deck};
use crate::query::{self, CardQuery, TagFilter};
use crate::tags::distinct_tags;
use tracing::debug;
use uuid::Uuid;

/// What a selection transition cleared or reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub deck_cleared: bool,
    pub card_cleared: bool,
    pub tag_filter_reset: bool,
}

impl SelectionChange {
    pub fn is_empty(&self) -> bool {
        !(self.deck_cleared || self.card_cleared || self.tag_filter_reset)
    }

    pub fn merge(self, other: SelectionChange) -> SelectionChange {
        SelectionChange {
            deck_cleared: self.deck_cleared || other.deck_cleared,
            card_cleared: self.card_cleared || other.card_cleared,
            tag_filter_reset: self.tag_filter_reset || other.tag_filter_reset,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    deck: Option<Uuid>,
    card: Option<Uuid>,
    query: CardQuery,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: CardQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn selected_deck(&self) -> Option<Uuid> {
        self.deck
    }

    pub fn selected_card(&self) -> Option<Uuid> {
        self.card
    }

    pub fn query(&self) -> &CardQuery {
        &self.query
    }

    /// The selected deck's card list under the current query.
    pub fn results<'a>(&self, deck: &'a Deck) -> Vec<&'a Card> {
        query::run(deck.cards(), &self.query)
    }

    /// Selects a deck, or none. Choosing a different deck clears the selected card.
    pub fn select_deck(&mut self, deck: Option<Uuid>) -> SelectionChange {
        let mut change = SelectionChange::default();
        if self.deck != deck {
            self.deck = deck;
            change.card_cleared = self.clear_card();
        }
        change
    }

    /// Selects a card of the selected deck, or clears the selection with `None`.
    ///
    /// Returns false and leaves the selection alone when `deck` is not the selected
    /// deck or the card is not in its current result set.
    pub fn select_card(&mut self, deck: &Deck, card: Option<Uuid>) -> bool {
        let Some(card_id) = card else {
            self.card = None;
            return true;
        };
        if self.deck != Some(deck.id) {
            return false;
        }
        if !self.results(deck).iter().any(|c| c.id == card_id) {
            return false;
        }
        self.card = Some(card_id);
        true
    }

    /// Replaces the whole query and re-checks the selection against `deck`.
    pub fn set_query(&mut self, query: CardQuery, deck: Option<&Deck>) -> SelectionChange {
        self.query = query;
        self.reconcile(deck)
    }

    /// Edits the query in place and re-checks the selection against `deck`.
    pub fn update_query<F>(&mut self, deck: Option<&Deck>, edit: F) -> SelectionChange
    where
        F: FnOnce(&mut CardQuery),
    {
        edit(&mut self.query);
        self.reconcile(deck)
    }

    /// Brings the selection back in line with the current state of the selected deck.
    ///
    /// `deck` is the selected deck as stored now, `None` if it no longer exists. A
    /// deck with another id counts as missing.
    pub fn reconcile(&mut self, deck: Option<&Deck>) -> SelectionChange {
        let deck = deck.filter(|d| Some(d.id) == self.deck);
        let mut change = SelectionChange::default();

        if self.deck.is_some() && deck.is_none() {
            debug!(deck_id = ?self.deck, "selected deck is gone");
            self.deck = None;
            change.deck_cleared = true;
        }

        if let TagFilter::Tag(tag) = &self.query.tag {
            let still_used = deck
                .map(|d| distinct_tags(d.cards()).iter().any(|t| t == tag))
                .unwrap_or(false);
            if !still_used {
                debug!(tag = %tag, "tag filter no longer matches a tag, resetting");
                self.query.tag = TagFilter::Off;
                change.tag_filter_reset = true;
            }
        }

        if let Some(card_id) = self.card {
            let visible = deck
                .map(|d| self.results(d).iter().any(|c| c.id == card_id))
                .unwrap_or(false);
            if !visible {
                change.card_cleared = self.clear_card();
            }
        }

        change
    }

    /// A card was deleted; `deck` is its deck after the deletion.
    pub fn card_deleted(&mut self, card_id: Uuid, deck: Option<&Deck>) -> SelectionChange {
        let mut change = SelectionChange::default();
        if self.card == Some(card_id) {
            change.card_cleared = self.clear_card();
        }
        change.merge(self.reconcile(deck))
    }

    /// A deck was deleted along with its cards.
    pub fn deck_deleted(&mut self, deck_id: Uuid) -> SelectionChange {
        let mut change = SelectionChange::default();
        if self.deck == Some(deck_id) {
            self.deck = None;
            change.deck_cleared = true;
            change.card_cleared = self.clear_card();
        }
        change
    }

    fn clear_card(&mut self) -> bool {
        match self.card.take() {
            Some(id) => {
                debug!(card_id = %id, "cleared selected card");
                true
            }
            None => false,
        }
    }
}
