//! # Ledger Store Port
//!
//! The versioned key-value interface the product lifecycle contract is
//! written against.
//!
//! Production: `RocksDbLedger` (feature `rocksdb`)
//! Testing: `InMemoryLedger`

use crate::domain::{KeyModification, KeyRange, LedgerError};

/// Lazy `(key, value)` sequence in ascending key order.
///
/// Dropping the iterator releases the underlying cursor.
pub type StateIter<'a> = Box<dyn Iterator<Item = Result<(String, Vec<u8>), LedgerError>> + 'a>;

/// Lazy revision sequence for one key, oldest first.
///
/// Dropping the iterator releases the underlying cursor.
pub type HistoryIter<'a> = Box<dyn Iterator<Item = Result<KeyModification, LedgerError>> + 'a>;

/// Versioned key-value world state.
pub trait LedgerStore: Send + Sync {
    /// Current value of `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Commit a new value for `key`, appending a revision to its history.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    /// Current values for every key in `range`, ascending by key.
    fn scan_range(&self, range: &KeyRange) -> Result<StateIter<'_>, LedgerError>;

    /// Every committed value of `key`, oldest first. Empty for unknown keys.
    fn history(&self, key: &str) -> Result<HistoryIter<'_>, LedgerError>;

    /// True if `key` currently holds a value.
    fn exists(&self, key: &str) -> Result<bool, LedgerError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Reject keys and values the ledger cannot represent.
pub(crate) fn validate_write(key: &str, value: &[u8]) -> Result<(), LedgerError> {
    if key.is_empty() {
        return Err(LedgerError::EmptyKey);
    }
    if value.is_empty() {
        return Err(LedgerError::EmptyValue {
            key: key.to_string(),
        });
    }
    Ok(())
}
