//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for a host application, whatever its UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Supplies preferences** to commands that need them (default sidedness, import naming)
//! - **Keeps the selection consistent**: after every mutation it re-checks the selected
//!   deck, card and tag filter against the store before returning
//! - **Records the last error** of import and export so a host can show one notification
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: returns data structures, not formatted output
//! - **Dialogs**: files come in through a [`FileSource`] and go out through a [`FileSink`]
//!
//! ## Generic Over DataStore
//!
//! `FlexiDeckApi<S: DataStore>` is generic over the storage backend:
//! - Production: `FlexiDeckApi<FileStore>`
//! - Testing: `FlexiDeckApi<InMemoryStore>`
//!
//! ## Testing Strategy
//!
//! API tests verify the glue: the right command runs, preferences flow in, and the
//! selection ends up consistent. Command logic is tested in the command modules.

use crate::commands::{self, CmdMessage, CmdResult};
use crate::commands::import::ImportOptions;
use crate::commands::update::{CardUpdate, DeckUpdate};
use crate::config::{PrefKey, Preferences};
use crate::error::{DeckError, Result};
use crate::files::{FileSink, FileSource};
use crate::model::{Card, Deck};
use crate::query::{self, CardQuery, RandomSource};
use crate::selection::{Selection, SelectionChange};
use crate::store::DataStore;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// The main API facade for flexideck operations.
pub struct FlexiDeckApi<S: DataStore> {
    store: S,
    preferences: Preferences,
    selection: Selection,
    last_error: Option<String>,
}

impl<S: DataStore> FlexiDeckApi<S> {
    /// Builds the facade. The card list starts sorted by the preferred sort mode.
    pub fn new(store: S, preferences: Preferences) -> Self {
        let query = CardQuery::new().with_sort(preferences.card_sort_mode);
        Self {
            store,
            preferences,
            selection: Selection::with_query(query),
            last_error: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The most recent import or export failure, if one has not been dismissed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Sets a preference slot by name. Changing the sort mode re-sorts the card list.
    pub fn set_preference(&mut self, key: PrefKey, value: &str) -> Result<()> {
        self.preferences.set(key, value)?;
        if key == PrefKey::CardSortMode {
            let sort = self.preferences.card_sort_mode;
            self.update_query(|query| query.sort = sort)?;
        }
        Ok(())
    }

    // --- Decks ---

    pub fn create_deck(&mut self, name: Option<String>) -> Result<CmdResult> {
        let sides = self.preferences.new_deck_sides();
        commands::create::deck(&mut self.store, name, sides)
    }

    pub fn update_deck(&mut self, deck_id: &Uuid, update: DeckUpdate) -> Result<CmdResult> {
        let result = commands::update::deck(&mut self.store, deck_id, update)?;
        self.reconcile()?;
        Ok(result)
    }

    pub fn delete_deck(&mut self, deck_id: &Uuid) -> Result<CmdResult> {
        let result = commands::delete::deck(&mut self.store, deck_id)?;
        self.selection.deck_deleted(*deck_id);
        self.reconcile()?;
        Ok(result)
    }

    pub fn delete_all_decks(&mut self) -> Result<CmdResult> {
        let result = commands::delete::all_decks(&mut self.store)?;
        for deck in &result.affected_decks {
            self.selection.deck_deleted(deck.id);
        }
        self.reconcile()?;
        Ok(result)
    }

    pub fn list_decks(&self) -> Result<CmdResult> {
        commands::list::decks(&self.store)
    }

    // --- Cards ---

    pub fn create_card(&mut self, deck_id: &Uuid, title: Option<String>) -> Result<CmdResult> {
        commands::create::card(&mut self.store, deck_id, title)
    }

    pub fn update_card(&mut self, card_id: &Uuid, update: CardUpdate) -> Result<CmdResult> {
        let result = commands::update::card(&mut self.store, card_id, update)?;
        self.reconcile()?;
        Ok(result)
    }

    pub fn toggle_completion(&mut self, card_id: &Uuid) -> Result<CmdResult> {
        let result = commands::update::toggle_completion(&mut self.store, card_id)?;
        self.reconcile()?;
        Ok(result)
    }

    pub fn delete_card(&mut self, card_id: &Uuid) -> Result<CmdResult> {
        let result = commands::delete::card(&mut self.store, card_id)?;
        let deck = self.selected_deck()?;
        self.selection.card_deleted(*card_id, deck.as_ref());
        Ok(result)
    }

    pub fn delete_all_cards(&mut self, deck_id: &Uuid) -> Result<CmdResult> {
        let result = commands::delete::all_cards(&mut self.store, deck_id)?;
        self.reconcile()?;
        Ok(result)
    }

    pub fn move_card(&mut self, card_id: &Uuid, target_deck_id: &Uuid) -> Result<CmdResult> {
        let result = commands::move_cards::run(&mut self.store, card_id, target_deck_id)?;
        self.reconcile()?;
        Ok(result)
    }

    /// A deck's cards under the current query.
    pub fn list_cards(&self, deck_id: &Uuid) -> Result<CmdResult> {
        commands::list::cards(&self.store, deck_id, self.selection.query())
    }

    pub fn list_tags(&self, deck_id: &Uuid) -> Result<CmdResult> {
        commands::list::tags(&self.store, deck_id)
    }

    // --- Selection ---

    /// Selects a deck, or none. A stale tag filter is reset against the new deck.
    pub fn select_deck(&mut self, deck_id: Option<Uuid>) -> Result<SelectionChange> {
        if let Some(id) = &deck_id {
            self.store.get_deck(id)?;
        }
        let change = self.selection.select_deck(deck_id);
        Ok(change.merge(self.reconcile()?))
    }

    /// Selects a card from the selected deck's current result set, or clears it.
    pub fn select_card(&mut self, card_id: Option<Uuid>) -> Result<()> {
        let Some(id) = card_id else {
            if let Some(deck) = self.selected_deck()? {
                self.selection.select_card(&deck, None);
            }
            return Ok(());
        };
        let deck = self
            .selected_deck()?
            .ok_or_else(|| DeckError::Api("No deck selected".to_string()))?;
        if !deck.contains_card(&id) {
            return Err(DeckError::CardNotFound(id));
        }
        if !self.selection.select_card(&deck, Some(id)) {
            return Err(DeckError::Api(
                "Card is hidden by the current filters".to_string(),
            ));
        }
        Ok(())
    }

    /// Replaces the card query. The chosen sort mode becomes the preferred one.
    pub fn set_query(&mut self, query: CardQuery) -> Result<SelectionChange> {
        let deck = self.selected_deck()?;
        self.preferences.card_sort_mode = query.sort;
        Ok(self.selection.set_query(query, deck.as_ref()))
    }

    /// Edits the card query in place, e.g. `api.update_query(|q| q.search = "hola".into())`.
    pub fn update_query<F>(&mut self, edit: F) -> Result<SelectionChange>
    where
        F: FnOnce(&mut CardQuery),
    {
        let mut query = self.selection.query().clone();
        edit(&mut query);
        self.set_query(query)
    }

    /// Whether [`FlexiDeckApi::random_card`] can offer a card other than the selected one.
    pub fn can_pick_random(&self) -> Result<bool> {
        let Some(deck) = self.selected_deck()? else {
            return Ok(false);
        };
        let results = self.selection.results(&deck);
        Ok(query::can_pick_random(&results, self.selection.selected_card()))
    }

    /// Selects a random card from the result set other than the selected one.
    pub fn random_card<R: RandomSource>(&mut self, rng: &mut R) -> Result<Option<Card>> {
        let Some(deck) = self.selected_deck()? else {
            return Ok(None);
        };
        let picked = {
            let results = self.selection.results(&deck);
            query::pick_random_excluding(&results, self.selection.selected_card(), rng).cloned()
        };
        if let Some(card) = &picked {
            self.selection.select_card(&deck, Some(card.id));
        }
        Ok(picked)
    }

    // --- Files ---

    /// Imports deck files. Failures are reported per file and never abort the batch.
    pub fn import_files<F>(&mut self, source: &F, paths: &[PathBuf]) -> CmdResult
    where
        F: FileSource + ?Sized,
    {
        let options = ImportOptions {
            use_file_name_as_deck_name: self.preferences.use_file_name_as_deck_name,
        };
        let report = commands::import::run(&mut self.store, source, paths, options);
        if let Some(failure) = report.failures.last() {
            self.last_error = Some(failure.message());
        }
        let mut result = report.into_cmd_result();
        if let Err(e) = self.reconcile() {
            self.record_failure(&mut result, e);
        }
        result
    }

    pub fn export_deck<K>(&mut self, deck_id: &Uuid, sink: &mut K) -> CmdResult
    where
        K: FileSink + ?Sized,
    {
        match commands::export::deck(&self.store, deck_id, sink) {
            Ok(result) => result,
            Err(e) => {
                let mut result = CmdResult::default();
                self.record_failure(&mut result, e);
                result
            }
        }
    }

    pub fn export_all<K>(&mut self, sink: &mut K) -> CmdResult
    where
        K: FileSink + ?Sized,
    {
        match commands::export::all_decks(&self.store, sink) {
            Ok(result) => result,
            Err(e) => {
                let mut result = CmdResult::default();
                self.record_failure(&mut result, e);
                result
            }
        }
    }

    fn record_failure(&mut self, result: &mut CmdResult, error: DeckError) {
        let message = error.to_string();
        debug!(error = %message, "recording last error");
        result.add_message(CmdMessage::error(message.clone()));
        self.last_error = Some(message);
    }

    /// The selected deck as stored now, `None` if nothing is selected or it is gone.
    fn selected_deck(&self) -> Result<Option<Deck>> {
        let Some(id) = self.selection.selected_deck() else {
            return Ok(None);
        };
        match self.store.get_deck(&id) {
            Ok(deck) => Ok(Some(deck)),
            Err(DeckError::DeckNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn reconcile(&mut self) -> Result<SelectionChange> {
        let deck = self.selected_deck()?;
        Ok(self.selection.reconcile(deck.as_ref()))
    }
}
