//! Card filters.
//!
//! Each filter is a closed set of choices with an `Off` state that keeps every card.
//! Filters never reorder; they only decide whether a single card stays.

use crate::model::{Card, Sides};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidesFilter {
    #[default]
    Off,
    OneSided,
    TwoSided,
}

impl SidesFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            SidesFilter::Off => true,
            SidesFilter::OneSided => card.sides() == Sides::One,
            SidesFilter::TwoSided => card.sides() == Sides::Two,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagFilter {
    #[default]
    Off,
    /// Cards with no tags at all.
    Untagged,
    /// Cards carrying this exact tag, `#` included.
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            TagFilter::Off => true,
            TagFilter::Untagged => card.tags().is_empty(),
            TagFilter::Tag(tag) => card.has_tag(tag),
        }
    }

    /// The tag this filter requires, if it names one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            TagFilter::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionFilter {
    #[default]
    Off,
    NotCompleted,
    Completed,
}

impl CompletionFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            CompletionFilter::Off => true,
            CompletionFilter::NotCompleted => !card.completed,
            CompletionFilter::Completed => card.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingFilter {
    #[default]
    Off,
    Unrated,
    /// Exactly this many stars, 1 through 5.
    Stars(u8),
}

impl RatingFilter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            RatingFilter::Off => true,
            RatingFilter::Unrated => card.rating() == 0,
            RatingFilter::Stars(stars) => card.rating() == *stars,
        }
    }
}

/// Case-insensitive substring search over title, front and back.
///
/// An empty search keeps every card.
pub fn matches_search(card: &Card, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let needle = search_text.to_lowercase();
    [card.title.as_str(), card.front(), card.back()]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
