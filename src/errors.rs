use thiserror::Error;
use uuid::Uuid;

/// Rejections raised while checking user input for a new expense.
///
/// The display strings are the notices shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a category!")]
    MissingCategory,
    #[error("Unknown category `{0}`. Use `categories` to list the available ones.")]
    UnknownCategory(String),
    #[error("Please enter a valid amount!")]
    InvalidAmount,
    #[error("Please select a date!")]
    MissingDate,
    #[error("Please enter a valid date (expected format {format}).")]
    InvalidDate { format: String },
}

/// Error type that captures ledger, storage, and configuration failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No expense at position {position} (ledger holds {len})")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("No expense with id {0}")]
    RecordNotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
