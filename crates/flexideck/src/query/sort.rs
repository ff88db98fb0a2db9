//! Card sort modes.
//!
//! Every mode is a total order over one key. Sorting is stable, so cards with equal
//! keys keep their deck order and sorting an already-sorted list changes nothing.

use crate::model::Card;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    TitleAscending,
    TitleDescending,
    CreatedAscending,
    CreatedDescending,
    ModifiedAscending,
    ModifiedDescending,
    RatingAscending,
    RatingDescending,
}

impl SortMode {
    pub const ALL: [SortMode; 8] = [
        SortMode::TitleAscending,
        SortMode::TitleDescending,
        SortMode::CreatedAscending,
        SortMode::CreatedDescending,
        SortMode::ModifiedAscending,
        SortMode::ModifiedDescending,
        SortMode::RatingAscending,
        SortMode::RatingDescending,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::TitleAscending => "title-ascending",
            SortMode::TitleDescending => "title-descending",
            SortMode::CreatedAscending => "created-ascending",
            SortMode::CreatedDescending => "created-descending",
            SortMode::ModifiedAscending => "modified-ascending",
            SortMode::ModifiedDescending => "modified-descending",
            SortMode::RatingAscending => "rating-ascending",
            SortMode::RatingDescending => "rating-descending",
        }
    }

    /// Orders two cards by this mode's key. Titles compare case-sensitively.
    pub fn compare(self, a: &Card, b: &Card) -> Ordering {
        match self {
            SortMode::TitleAscending => a.title.cmp(&b.title),
            SortMode::TitleDescending => b.title.cmp(&a.title),
            SortMode::CreatedAscending => a.created_at.cmp(&b.created_at),
            SortMode::CreatedDescending => b.created_at.cmp(&a.created_at),
            SortMode::ModifiedAscending => a.modified_at.cmp(&b.modified_at),
            SortMode::ModifiedDescending => b.modified_at.cmp(&a.modified_at),
            SortMode::RatingAscending => a.rating().cmp(&b.rating()),
            SortMode::RatingDescending => b.rating().cmp(&a.rating()),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("Unknown sort mode: {}", s))
    }
}

/// Stable in-place sort of card references.
pub fn sort_cards(cards: &mut [&Card], mode: SortMode) {
    cards.sort_by(|a, b| mode.compare(a, b));
}
