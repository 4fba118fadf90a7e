//! # Product Repository
//!
//! Point access to product records through the Ledger Store: existence,
//! create-if-absent, read and overwrite. Access control and transition
//! checks happen in the service before anything here writes.

use sc_01_ledger_store::LedgerStore;

use crate::domain::codec::{decode_record, encode_record};
use crate::domain::entities::ProductRecord;
use crate::errors::{ContractError, ContractResult};

/// Record-level view of a ledger store.
#[derive(Debug)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: LedgerStore> ProductRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// True if a value is stored under `id`. The value is not decoded.
    pub fn exists(&self, id: &str) -> ContractResult<bool> {
        Ok(self.store.exists(id)?)
    }

    /// Current record, or `None` if absent.
    pub fn find(&self, id: &str) -> ContractResult<Option<ProductRecord>> {
        match self.store.get(id)? {
            Some(bytes) => decode_record(&bytes)
                .map(Some)
                .map_err(|e| ContractError::decode(id, e)),
            None => Ok(None),
        }
    }

    /// Current record, `NotFound` if absent.
    pub fn read(&self, id: &str) -> ContractResult<ProductRecord> {
        self.find(id)?.ok_or_else(|| ContractError::NotFound { id: id.to_string() })
    }

    /// Write a record whose id must not exist yet.
    pub fn create(&mut self, record: &ProductRecord) -> ContractResult<()> {
        if self.exists(&record.id)? {
            return Err(ContractError::AlreadyExists {
                id: record.id.clone(),
            });
        }
        self.save(record)
    }

    /// Encode and write `record` under its id, unconditionally.
    pub fn save(&mut self, record: &ProductRecord) -> ContractResult<()> {
        let bytes = encode_record(record).map_err(|e| ContractError::decode(&record.id, e))?;
        self.store.put(&record.id, &bytes)?;
        supply_telemetry::metric_inc!(supply_telemetry::LEDGER_WRITES);
        tracing::trace!(product_id = %record.id, bytes = bytes.len(), "record written");
        Ok(())
    }

    /// Underlying store, for scans and history.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store.
    pub fn into_store(self) -> S {
        self.store
    }
}
