//! # Ledger Adapters
//!
//! Concrete `LedgerStore` implementations.

pub mod cursor;
pub mod memory;

#[cfg(feature = "rocksdb")]
pub mod rocksdb_ledger;

pub use cursor::TrackedCursor;
pub use memory::InMemoryLedger;

#[cfg(feature = "rocksdb")]
pub use rocksdb_ledger::{RocksDbLedger, RocksDbLedgerConfig, CF_HISTORY, CF_METADATA, CF_STATE};
