use thiserror::Error;

/// Failures of the ledger store itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Keys must be non-empty.
    #[error("invalid key: key must not be empty")]
    EmptyKey,

    /// Values must be non-empty; an empty value is indistinguishable from absence.
    #[error("invalid value for key {key}: value must not be empty")]
    EmptyValue { key: String },

    /// The backing storage failed.
    #[error("ledger I/O error: {message}")]
    Io { message: String },

    /// Stored bytes do not follow the adapter's layout.
    #[error("ledger data corrupted: {message}")]
    Corrupted { message: String },
}
