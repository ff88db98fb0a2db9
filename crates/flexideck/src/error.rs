use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    /// A deck file that is malformed or structurally incomplete.
    #[error("Invalid deck file: {0}")]
    Decode(String),

    /// A deck that could not be serialized for export.
    #[error("The deck \"{deck_name}\" couldn't be exported: {source}")]
    Encode {
        deck_id: Uuid,
        deck_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The transient read grant for a user-chosen file was refused.
    #[error(
        "The deck at {} couldn't be imported because access to the file was denied",
        .0.display()
    )]
    FileAccess(PathBuf),

    #[error("File error at {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;
