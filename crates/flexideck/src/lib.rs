//! # FlexiDeck Architecture
//!
//! FlexiDeck is a **UI-agnostic flashcard library**. A host application (desktop,
//! mobile, web) draws the decks and cards; this crate owns the data, the card list
//! query, selection consistency and the deck file format.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns preferences and the current selection               │
//! │  - Re-checks the selection after every mutation             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic: create, edit, delete, move, import, ...  │
//! │  - Returns structured CmdResult values                      │
//! └─────────────────────────────────────────────────────────────┘
//!              │                                   │
//!              ▼                                   ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────┐
//! │  query/, selection.rs     │   │  codec.rs, files.rs         │
//! │  sort, filters, search,   │   │  deck file format, read     │
//! │  random pick, selection   │   │  grants, export sinks       │
//! └───────────────────────────┘   └─────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Code from `api.rs` inward:
//! - Takes regular Rust function arguments and returns `Result<CmdResult>`
//! - **Never** writes to stdout/stderr; diagnostics go through `tracing`
//! - **Never** opens dialogs; files arrive through a [`files::FileSource`] and leave
//!   through a [`files::FileSink`]
//!
//! All state changes happen on the caller's thread and finish before the call returns.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): thorough unit tests against `InMemoryStore`.
//! 2. **Query and selection**: property-style tests over the Spanish fixture deck.
//! 3. **API** (`api.rs`): dispatch, preference flow and selection outcomes.
//! 4. **Integration** (`tests/`): real directories via `tempfile`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`query`]: Card list sort, filters, search and random pick
//! - [`selection`]: Selected deck/card bookkeeping
//! - [`codec`]: Deck file encoding and decoding
//! - [`files`]: File boundary for import and export
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Deck`, `Card`, `Sides`)
//! - [`tags`]: Tag extraction from card fronts
//! - [`config`]: User preferences
//! - [`init`]: Default locations on disk
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod init;
pub mod model;
pub mod query;
pub mod selection;
pub mod store;
pub mod tags;
