//! Error types.
//!
//! Application code (configuration, commands) uses `anyhow` through the [`Result`] alias. The
//! record store and the CSV adapter return the typed errors below so that callers can tell a bad
//! value apart from a bad file.

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Raised at the add boundary when raw user input cannot become an `Expense`. The store is never
/// mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("Invalid date '{value}': expected a calendar date in the format YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid category: a category name cannot be empty")]
    InvalidCategory,
}

/// Raised while saving or loading an expenses CSV file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The file could not be opened, read, or written.
    #[error("Unable to {action} '{origin}': {source}")]
    Io {
        action: &'static str,
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed. `line` is 1-based and counts the header row.
    #[error("Malformed row at line {line} of '{origin}': {reason}")]
    Format {
        origin: String,
        line: u64,
        reason: String,
    },
}

/// Raised when summing amounts would exceed what a `Decimal` can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("The sum of the expense amounts is too large to represent")]
pub struct OverflowError;

impl StorageError {
    /// The 1-based line of the offending row, if this is a format error.
    pub fn line(&self) -> Option<u64> {
        match self {
            StorageError::Io { .. } => None,
            StorageError::Format { line, .. } => Some(*line),
        }
    }
}
