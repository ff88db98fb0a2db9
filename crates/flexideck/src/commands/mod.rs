//! # Command Layer
//!
//! This module contains the **core business logic** of flexideck. Each command lives
//! in its own submodule and implements plain functions over a [`DataStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Load decks, apply the change, save them back in one store write
//! - Enforce the entity rules (defaults, card-to-deck membership)
//! - Return structured [`CmdResult`] values with affected entities and messages
//! - Stay UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Selection tracking**: the API facade reconciles the selection after each call
//! - **Rendering**: no formatting beyond short human-readable messages
//! - **User interaction**: no prompts or confirmations
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_decks` / `affected_cards`: entities as they are after the command
//! - `listed_decks` / `listed_cards`: entities to display
//! - `tags`: distinct tags of a deck
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and cover every branch; this is where most of
//! the crate's tests live.
//!
//! ## Command Modules
//!
//! - [`create`]: Create decks and cards
//! - [`update`]: Edit decks and cards, toggle completion
//! - [`delete`]: Delete decks and cards, one or all
//! - [`move_cards`]: Move a card to another deck
//! - [`list`]: List decks, query cards, list tags
//! - [`export`]: Export one deck or all decks
//! - [`import`]: Import deck files
//! - [`helpers`]: Shared lookups
//!
//! [`DataStore`]: crate::store::DataStore

use crate::model::{Card, Deck};
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod move_cards;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_decks: Vec<Deck>,
    pub affected_cards: Vec<Card>,
    pub listed_decks: Vec<Deck>,
    pub listed_cards: Vec<Card>,
    pub tags: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_decks(mut self, decks: Vec<Deck>) -> Self {
        self.affected_decks = decks;
        self
    }

    pub fn with_affected_cards(mut self, cards: Vec<Card>) -> Self {
        self.affected_cards = cards;
        self
    }

    pub fn with_listed_decks(mut self, decks: Vec<Deck>) -> Self {
        self.listed_decks = decks;
        self
    }

    pub fn with_listed_cards(mut self, cards: Vec<Card>) -> Self {
        self.listed_cards = cards;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// The most recent error message, if any.
    pub fn last_error(&self) -> Option<&CmdMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.level == MessageLevel::Error)
    }
}
