//! # History Tracker
//!
//! Replays every committed revision of one product, oldest first. Existence
//! is not checked: a key that was never written has an empty history.

use sc_01_ledger_store::{LedgerStore, Revision};
use uuid::Uuid;

use crate::domain::codec::decode_record;
use crate::domain::entities::ProductRecord;
use crate::errors::{ContractError, ContractResult};

/// One decoded revision of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub revision: Revision,
    /// Write that produced the revision.
    pub tx_id: Uuid,
    /// Record state right after that write.
    pub record: ProductRecord,
}

/// All revisions of `id`, oldest first.
pub fn track_history<S: LedgerStore>(store: &S, id: &str) -> ContractResult<Vec<HistoryEntry>> {
    let cursor = store.history(id)?;
    let mut entries = Vec::new();
    for modification in cursor {
        let modification = modification?;
        let record =
            decode_record(&modification.value).map_err(|e| ContractError::decode(id, e))?;
        entries.push(HistoryEntry {
            revision: modification.revision,
            tx_id: modification.tx_id,
            record,
        });
    }
    tracing::debug!(product_id = id, revisions = entries.len(), "history replayed");
    Ok(entries)
}
