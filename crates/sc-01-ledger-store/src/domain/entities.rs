//! # Ledger Entities

use uuid::Uuid;

/// Ledger-wide commit sequence number. Strictly increasing across all keys.
pub type Revision = u64;

/// One committed version of a key's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    /// Id of the write that produced this version.
    pub tx_id: Uuid,
    /// Commit sequence number of the write.
    pub revision: Revision,
    /// Value as written.
    pub value: Vec<u8>,
}

/// Half-open key range `[start, end)` over product ids.
///
/// An empty bound is open on that side, so `KeyRange::full()` covers every key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyRange {
    /// Inclusive lower bound, or empty for the first key.
    pub start: String,
    /// Exclusive upper bound, or empty for past the last key.
    pub end: String,
}

impl KeyRange {
    /// Range over every key in the store.
    pub fn full() -> Self {
        Self::default()
    }

    /// Range `[start, end)`.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// True if `key` falls inside the range.
    pub fn contains(&self, key: &str) -> bool {
        let above_start = self.start.is_empty() || key >= self.start.as_str();
        let below_end = self.end.is_empty() || key < self.end.as_str();
        above_start && below_end
    }

    /// True if the upper bound has been passed by `key`.
    pub fn is_past_end(&self, key: &str) -> bool {
        !self.end.is_empty() && key >= self.end.as_str()
    }
}
