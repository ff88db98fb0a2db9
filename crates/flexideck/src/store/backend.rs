use crate::error::Result;
use crate::model::Deck;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while DeckStore handles the "what" (identity checks, ordering, linking).
pub trait StorageBackend {
    /// Load every stored deck. A missing store is an empty one.
    fn load_decks(&self) -> Result<Vec<Deck>>;

    /// Replace the stored decks.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_decks(&self, decks: &[Deck]) -> Result<()>;

    /// Where the decks live. For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
