use crate::adapters::cursor::TrackedCursor;
use crate::domain::{KeyModification, KeyRange, LedgerError, Revision};
use crate::ports::{validate_write, HistoryIter, LedgerStore, StateIter};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// In-memory versioned ledger for tests and single-process hosts.
///
/// Keeps every revision of every key; the last revision is the current state.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    keys: BTreeMap<String, Vec<KeyModification>>,
    last_revision: Revision,
    open_cursors: AtomicUsize,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scan or history iterators currently alive.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// Sequence number of the most recent write, 0 before the first write.
    pub fn last_revision(&self) -> Revision {
        self.last_revision
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl LedgerStore for InMemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self
            .keys
            .get(key)
            .and_then(|revisions| revisions.last())
            .map(|latest| latest.value.clone()))
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        validate_write(key, value)?;
        self.last_revision += 1;
        let modification = KeyModification {
            tx_id: Uuid::new_v4(),
            revision: self.last_revision,
            value: value.to_vec(),
        };
        tracing::trace!(key, revision = self.last_revision, "ledger write");
        self.keys.entry(key.to_string()).or_default().push(modification);
        Ok(())
    }

    fn scan_range(&self, range: &KeyRange) -> Result<StateIter<'_>, LedgerError> {
        let lower = if range.start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(range.start.as_str())
        };

        // Keys arrive sorted from `lower`, so the first key outside the range ends the scan.
        let owned_range = range.clone();
        let entries = self
            .keys
            .range::<str, _>((lower, Bound::Unbounded))
            .take_while(move |(key, _)| owned_range.contains(key))
            .filter_map(|(key, revisions)| {
                revisions
                    .last()
                    .map(|latest| Ok::<_, LedgerError>((key.clone(), latest.value.clone())))
            });
        Ok(Box::new(TrackedCursor::new(entries, &self.open_cursors)))
    }

    fn history(&self, key: &str) -> Result<HistoryIter<'_>, LedgerError> {
        let revisions = self
            .keys
            .get(key)
            .map(|revisions| revisions.as_slice())
            .unwrap_or_default();
        let entries = revisions.iter().cloned().map(Ok::<_, LedgerError>);
        Ok(Box::new(TrackedCursor::new(entries, &self.open_cursors)))
    }
}
