//! # Card Query Pipeline
//!
//! Turns a deck's cards into the list the user sees. A [`CardQuery`] bundles one
//! choice per stage and [`run`] applies the stages in a fixed order:
//!
//! ```text
//! sort → sides → tags → completion → rating → search
//! ```
//!
//! Sorting runs first; every later stage is an order-preserving filter, so the
//! result set is the same whichever order the filters run in. The pipeline borrows
//! the deck's cards and never mutates them.
//!
//! ## Derived Data
//!
//! - [`crate::tags::distinct_tags`] lists every tag in a deck, ignoring the query.
//! - [`random::pick_random_excluding`] picks another card from a result set.

pub mod filter;
pub mod random;
pub mod sort;

pub use filter::{matches_search, CompletionFilter, RatingFilter, SidesFilter, TagFilter};
pub use random::{can_pick_random, pick_random_excluding, RandomSource, UuidRandom};
pub use sort::{sort_cards, SortMode};

use crate::model::Card;
use uuid::Uuid;

/// Every parameter of the card list: sort, four filters and the search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardQuery {
    pub sort: SortMode,
    pub sides: SidesFilter,
    pub tag: TagFilter,
    pub completion: CompletionFilter,
    pub rating: RatingFilter,
    pub search: String,
}

impl CardQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_sides(mut self, sides: SidesFilter) -> Self {
        self.sides = sides;
        self
    }

    pub fn with_tag(mut self, tag: TagFilter) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_completion(mut self, completion: CompletionFilter) -> Self {
        self.completion = completion;
        self
    }

    pub fn with_rating(mut self, rating: RatingFilter) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// True when the card passes every filter and the search.
    pub fn matches(&self, card: &Card) -> bool {
        self.sides.matches(card)
            && self.tag.matches(card)
            && self.completion.matches(card)
            && self.rating.matches(card)
            && matches_search(card, &self.search)
    }
}

/// Runs the full pipeline over a deck's cards.
pub fn run<'a>(cards: &'a [Card], query: &CardQuery) -> Vec<&'a Card> {
    let mut result: Vec<&Card> = cards.iter().collect();
    sort_cards(&mut result, query.sort);
    result.retain(|card| query.sides.matches(card));
    result.retain(|card| query.tag.matches(card));
    result.retain(|card| query.completion.matches(card));
    result.retain(|card| query.rating.matches(card));
    result.retain(|card| matches_search(card, &query.search));
    result
}

/// Ids of the cards [`run`] would return, in order.
pub fn result_ids(cards: &[Card], query: &CardQuery) -> Vec<Uuid> {
    run(cards, query).into_iter().map(|card| card.id).collect()
}
