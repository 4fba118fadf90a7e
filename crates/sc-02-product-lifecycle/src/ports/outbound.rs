//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the contract is written against, owned by sibling crates.
//!
//! | Port | Crate | Purpose |
//! |------|-------|---------|
//! | `LedgerStore` | `sc-01-ledger-store` | Versioned world state and revision history |
//! | `IdentityResolver` | `shared-types` | Caller organization for the current invocation |

pub use sc_01_ledger_store::{HistoryIter, KeyModification, KeyRange, LedgerStore, StateIter};
pub use shared_types::{IdentityResolver, OrganizationId};
