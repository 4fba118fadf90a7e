//! # RocksDB Ledger Adapter
//!
//! Durable implementation of the `LedgerStore` trait.
//!
//! ## Column Families
//!
//! - `state` - current value per key
//! - `history` - every committed value, keyed by `len(key) || key || revision`
//! - `metadata` - ledger-wide revision counter
//!
//! A write updates all three families in one `WriteBatch`, so the current
//! state and its history never diverge.
//!
//! ## History Key Layout
//!
//! ```text
//! [key length: u32 BE][key bytes][revision: u64 BE]
//! ```
//!
//! The length prefix keeps `"4"` and `"42"` in separate history ranges; the
//! big-endian revision makes lexicographic order equal commit order.
//!
//! History values are `[tx_id: 16 bytes][value bytes]`.

use crate::domain::{KeyModification, KeyRange, LedgerError, Revision};
use crate::ports::{validate_write, HistoryIter, LedgerStore, StateIter};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB};
use std::path::Path;
use uuid::Uuid;

/// Column family names
pub const CF_STATE: &str = "state";
pub const CF_HISTORY: &str = "history";
pub const CF_METADATA: &str = "metadata";

const COLUMN_FAMILIES: &[&str] = &[CF_STATE, CF_HISTORY, CF_METADATA];

const LAST_REVISION_KEY: &[u8] = b"last_revision";

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbLedgerConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbLedgerConfig {
    fn default() -> Self {
        Self {
            path: "./data/ledger".to_string(),
            block_cache_size: 64 * 1024 * 1024, // 64MB
            write_buffer_size: 16 * 1024 * 1024, // 16MB
            sync_writes: true,
        }
    }
}

impl RocksDbLedgerConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 4 * 1024 * 1024,  // 4MB
            write_buffer_size: 1024 * 1024, // 1MB
            sync_writes: false,
        }
    }
}

/// RocksDB-backed versioned ledger.
pub struct RocksDbLedger {
    db: DB,
    config: RocksDbLedgerConfig,
    last_revision: Revision,
}

impl RocksDbLedger {
    /// Open or create a ledger database.
    pub fn open(config: RocksDbLedgerConfig) -> Result<Self, LedgerError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(*name, cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors).map_err(|e| {
            LedgerError::Io {
                message: format!("Failed to open RocksDB: {}", e),
            }
        })?;

        let mut ledger = Self {
            db,
            config,
            last_revision: 0,
        };
        ledger.last_revision = ledger.load_last_revision()?;
        tracing::info!(
            path = %ledger.config.path,
            last_revision = ledger.last_revision,
            "ledger opened"
        );
        Ok(ledger)
    }

    /// Open with default settings at `path`.
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let config = RocksDbLedgerConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::open(config)
    }

    /// Sequence number of the most recent write.
    pub fn last_revision(&self) -> Revision {
        self.last_revision
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, LedgerError> {
        self.db.cf_handle(name).ok_or_else(|| LedgerError::Corrupted {
            message: format!("missing column family {}", name),
        })
    }

    fn load_last_revision(&self) -> Result<Revision, LedgerError> {
        let raw = self
            .db
            .get_cf(self.cf(CF_METADATA)?, LAST_REVISION_KEY)
            .map_err(io_error)?;
        match raw {
            None => Ok(0),
            Some(bytes) => {
                let array: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    LedgerError::Corrupted {
                        message: format!("revision counter has {} bytes", bytes.len()),
                    }
                })?;
                Ok(u64::from_be_bytes(array))
            }
        }
    }
}

impl LedgerStore for RocksDbLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.db
            .get_cf(self.cf(CF_STATE)?, key.as_bytes())
            .map_err(io_error)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        validate_write(key, value)?;
        let revision = self.last_revision + 1;
        let tx_id = Uuid::new_v4();

        let mut history_value = Vec::with_capacity(16 + value.len());
        history_value.extend_from_slice(tx_id.as_bytes());
        history_value.extend_from_slice(value);

        let mut batch = WriteBatch::default();
        batch.put_cf(self.cf(CF_STATE)?, key.as_bytes(), value);
        batch.put_cf(self.cf(CF_HISTORY)?, history_key(key, revision), history_value);
        batch.put_cf(self.cf(CF_METADATA)?, LAST_REVISION_KEY, revision.to_be_bytes());

        let mut write_opts = rocksdb::WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        self.db.write_opt(batch, &write_opts).map_err(io_error)?;

        self.last_revision = revision;
        Ok(())
    }

    fn scan_range(&self, range: &KeyRange) -> Result<StateIter<'_>, LedgerError> {
        let mode = if range.start.is_empty() {
            IteratorMode::Start
        } else {
            IteratorMode::From(range.start.as_bytes(), Direction::Forward)
        };
        let range = range.clone();
        let entries = self
            .db
            .iterator_cf(self.cf(CF_STATE)?, mode)
            .map(|item| -> Result<(String, Vec<u8>), LedgerError> {
                let (key, value) = item.map_err(io_error)?;
                let key = String::from_utf8(key.into_vec()).map_err(|e| LedgerError::Corrupted {
                    message: format!("non UTF-8 key: {}", e),
                })?;
                Ok((key, value.into_vec()))
            })
            .take_while(move |entry| match entry {
                Ok((key, _)) => !range.is_past_end(key),
                Err(_) => true,
            });
        Ok(Box::new(entries))
    }

    fn history(&self, key: &str) -> Result<HistoryIter<'_>, LedgerError> {
        let prefix = history_prefix(key);
        let bound = prefix.clone();
        let entries = self
            .db
            .iterator_cf(
                self.cf(CF_HISTORY)?,
                IteratorMode::From(&prefix, Direction::Forward),
            )
            .take_while(move |item| match item {
                Ok((raw_key, _)) => raw_key.starts_with(&bound),
                Err(_) => true,
            })
            .map(|item| -> Result<KeyModification, LedgerError> {
                let (raw_key, raw_value) = item.map_err(io_error)?;
                decode_history_entry(&raw_key, &raw_value)
            });
        Ok(Box::new(entries))
    }
}

fn io_error(e: rocksdb::Error) -> LedgerError {
    LedgerError::Io {
        message: e.to_string(),
    }
}

fn history_prefix(key: &str) -> Vec<u8> {
    let bytes = key.as_bytes();
    let mut prefix = Vec::with_capacity(4 + bytes.len() + 8);
    prefix.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    prefix.extend_from_slice(bytes);
    prefix
}

fn history_key(key: &str, revision: Revision) -> Vec<u8> {
    let mut raw = history_prefix(key);
    raw.extend_from_slice(&revision.to_be_bytes());
    raw
}

fn decode_history_entry(raw_key: &[u8], raw_value: &[u8]) -> Result<KeyModification, LedgerError> {
    let revision_bytes = raw_key
        .len()
        .checked_sub(8)
        .and_then(|at| raw_key.get(at..))
        .ok_or_else(|| LedgerError::Corrupted {
            message: "history key too short".to_string(),
        })?;
    let revision = u64::from_be_bytes(revision_bytes.try_into().map_err(|_| {
        LedgerError::Corrupted {
            message: "history key too short".to_string(),
        }
    })?);

    if raw_value.len() < 16 {
        return Err(LedgerError::Corrupted {
            message: format!("history entry {} has no transaction id", revision),
        });
    }
    let (tx_bytes, value) = raw_value.split_at(16);
    let tx_id = Uuid::from_slice(tx_bytes).map_err(|e| LedgerError::Corrupted {
        message: format!("history entry {}: {}", revision, e),
    })?;

    Ok(KeyModification {
        tx_id,
        revision,
        value: value.to_vec(),
    })
}
