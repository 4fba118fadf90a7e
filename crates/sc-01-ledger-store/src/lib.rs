//! # sc-01-ledger-store
//!
//! Ledger Store subsystem for the supply-chain workspace.
//!
//! ## Role in System
//!
//! - **World State**: Current value of every key, addressed by product id
//! - **Revision Log**: Every committed write is retained per key, oldest first
//! - **Lazy Cursors**: Range scans and history replays are iterators over
//!   store-side cursors, released when the iterator is dropped
//!
//! ## Adapters
//!
//! | Adapter | Feature | Use |
//! |---------|---------|-----|
//! | `InMemoryLedger` | always | tests, single-process hosts |
//! | `RocksDbLedger` | `rocksdb` | durable hosts |
//!
//! ## Consistency
//!
//! The store assumes one writer per invocation. Ordering of invocations and
//! conflicting writers belong to the host platform; adapters take `&mut self`
//! for writes and perform no locking of their own.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
