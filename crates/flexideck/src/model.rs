//! # Domain Model: Decks and Cards
//!
//! A [`Deck`] is a named, ordered collection of [`Card`]s. The deck owns its cards:
//! removing a deck removes every card in it, and insertion order is the canonical
//! order of a deck before any sort is applied.
//!
//! ## Card Invariants
//!
//! - **Sidedness**: a one-sided card never carries back text. Switching a card to
//!   [`Sides::One`] clears its back, and writes to the back of a one-sided card are
//!   dropped.
//! - **Tags**: tags are never edited directly. They are recomputed from the words of
//!   `front` that start with `#` every time the front is saved (see [`crate::tags`]).
//! - **Rating**: star ratings live in `0..=5`, `0` meaning unrated. Larger values clamp.
//! - **Modification time**: every setter bumps `modified_at`.
//!
//! ## The Deck Handle
//!
//! Each card knows which deck holds it through a plain deck id, not a pointer. The
//! handle is private and only [`Deck`] writes it, so a card's handle and its deck's
//! membership always agree once a deck operation returns. The handle is not
//! persisted: decks re-link their cards when they are deserialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::tags::extract_tags;

/// Name given to decks created without one.
pub const DEFAULT_DECK_NAME: &str = "New Deck";

/// Title given to cards created without one.
pub const DEFAULT_CARD_TITLE: &str = "New Card";

pub const MAX_STAR_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sides {
    #[default]
    One,
    Two,
}

impl Sides {
    pub fn from_two_sided(two_sided: bool) -> Self {
        if two_sided {
            Sides::Two
        } else {
            Sides::One
        }
    }

    pub fn is_two_sided(self) -> bool {
        self == Sides::Two
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sides::One => write!(f, "1-sided"),
            Sides::Two => write!(f, "2-sided"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    #[serde(skip)]
    deck_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    front: String,
    #[serde(default)]
    back: String,
    #[serde(default)]
    sides: Sides,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    rating: u8,
    #[serde(default)]
    pub completed: bool,
}

impl Card {
    pub fn new(title: impl Into<String>, sides: Sides) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            deck_id: None,
            title: title.into(),
            front: String::new(),
            back: String::new(),
            sides,
            created_at: now,
            modified_at: now,
            tags: Vec::new(),
            rating: 0,
            completed: false,
        }
    }

    /// The deck currently holding this card, if it has been added to one.
    pub fn deck_id(&self) -> Option<Uuid> {
        self.deck_id
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn sides(&self) -> Sides {
        self.sides
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    /// Saves the front text and recomputes the card's tags from it.
    pub fn set_front(&mut self, front: impl Into<String>) {
        self.front = front.into();
        self.tags = extract_tags(&self.front);
        self.touch();
    }

    /// Saves the back text. One-sided cards keep an empty back.
    pub fn set_back(&mut self, back: impl Into<String>) {
        self.back = match self.sides {
            Sides::Two => back.into(),
            Sides::One => String::new(),
        };
        self.touch();
    }

    pub fn set_sides(&mut self, sides: Sides) {
        self.sides = sides;
        if sides == Sides::One {
            self.back.clear();
        }
        self.touch();
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.rating = rating.min(MAX_STAR_RATING);
        self.touch();
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.touch();
    }

    pub fn toggle_completed(&mut self) {
        self.set_completed(!self.completed);
    }

    /// Compares every user-visible field, ignoring identity and the deck handle.
    pub fn content_eq(&self, other: &Card) -> bool {
        self.title == other.title
            && self.front == other.front
            && self.back == other.back
            && self.sides == other.sides
            && self.created_at == other.created_at
            && self.modified_at == other.modified_at
            && self.tags == other.tags
            && self.rating == other.rating
            && self.completed == other.completed
    }

    fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    /// Sidedness given to cards created in this deck.
    pub new_cards_sides: Sides,
    cards: Vec<Card>,
}

// Stored decks carry no deck handle on their cards; restore it while loading.
impl<'de> Deserialize<'de> for Deck {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = DeckHelper::deserialize(deserializer)?;
        let mut deck = Deck {
            id: helper.id,
            name: helper.name,
            new_cards_sides: helper.new_cards_sides.unwrap_or_default(),
            cards: helper.cards,
        };
        deck.relink();
        Ok(deck)
    }
}

#[derive(Deserialize)]
struct DeckHelper {
    id: Uuid,
    #[serde(default)]
    name: String,
    #[serde(default)]
    new_cards_sides: Option<Sides>,
    #[serde(default)]
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>, new_cards_sides: Sides) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            new_cards_sides,
            cards: Vec::new(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, id: &Uuid) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == *id)
    }

    pub fn card_mut(&mut self, id: &Uuid) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == *id)
    }

    pub fn contains_card(&self, id: &Uuid) -> bool {
        self.card(id).is_some()
    }

    /// Appends a card and points its deck handle at this deck.
    pub fn add_card(&mut self, mut card: Card) -> &mut Card {
        card.deck_id = Some(self.id);
        let idx = self.cards.len();
        self.cards.push(card);
        &mut self.cards[idx]
    }

    /// Creates a card with this deck's default sidedness and appends it.
    pub fn new_card(&mut self, title: impl Into<String>) -> &mut Card {
        let card = Card::new(title, self.new_cards_sides);
        self.add_card(card)
    }

    /// Removes a card, detaching it from this deck.
    pub fn remove_card(&mut self, id: &Uuid) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.id == *id)?;
        let mut card = self.cards.remove(pos);
        card.deck_id = None;
        Some(card)
    }

    /// Removes every card, in order.
    pub fn take_cards(&mut self) -> Vec<Card> {
        let mut cards = std::mem::take(&mut self.cards);
        for card in &mut cards {
            card.deck_id = None;
        }
        cards
    }

    /// Points every card's deck handle at this deck.
    pub fn relink(&mut self) {
        let id = self.id;
        for card in &mut self.cards {
            card.deck_id = Some(id);
        }
    }

    /// True when every card's handle names this deck.
    pub fn is_linked(&self) -> bool {
        self.cards.iter().all(|c| c.deck_id == Some(self.id))
    }
}
