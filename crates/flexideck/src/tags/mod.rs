//! Tag support for flexideck.
//!
//! Tags are not entered on their own: any word on a card's front that starts with
//! `#` is a tag. They are extracted again whenever the front is saved, so a card's
//! tags always mirror its front text.
//!
//! ## Extraction Rules
//!
//! - Words are split on whitespace.
//! - A word is a tag when it starts with `#` and has at least one character after it.
//! - Trailing sentence punctuation (`. , ; : ! ?`) is not part of the tag.
//! - A tag appearing twice is kept once, at its first position.

use crate::model::Card;
use std::collections::BTreeSet;

pub const TAG_PREFIX: char = '#';

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Extracts the `#`-prefixed tags from a card's front text.
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        let word = word.trim_end_matches(TRAILING_PUNCTUATION);
        if !word.starts_with(TAG_PREFIX) || word.len() <= TAG_PREFIX.len_utf8() {
            continue;
        }
        if !tags.iter().any(|t| t == word) {
            tags.push(word.to_string());
        }
    }
    tags
}

/// Every tag used by any of the cards, sorted and without duplicates.
pub fn distinct_tags<'a, I>(cards: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Card>,
{
    cards
        .into_iter()
        .flat_map(|card| card.tags().iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
