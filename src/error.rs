//! Error types for the expense ledger.

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while operating on the ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to read or write the backing file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Backing file header does not match the expected table shape
    #[error("malformed expense file: expected header `ID,Date,Name,Category,Amount`, found `{found}`")]
    Header { found: String },

    /// Rejected input to `append`
    #[error("invalid expense: {message}")]
    Validation { message: String },

    /// `delete` referenced an id that is not in the ledger
    #[error("no expense with id {id}")]
    NotFound { id: u64 },
}
