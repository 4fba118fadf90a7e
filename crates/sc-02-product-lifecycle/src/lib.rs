//! # SC-02 Product Lifecycle - Manufacturer/Consumer Contract
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Tracks a manufactured product from creation to delivery between two
//! organizations that do not trust each other. Every state change is a write
//! to the versioned Ledger Store, so the full history of each product can be
//! replayed.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Product id unique | `repository.rs` - `ProductRepository::create()` |
//! | Manufacturer set once | `domain/invariants.rs` - `check_manufacturer_invariant()` |
//! | Consumer only replaced by a new order | `domain/invariants.rs` - `check_consumer_invariant()` |
//! | Forward-only status | `domain/transitions.rs` - `Transition::forbidden_from()` |
//! | No write before all checks pass | `service.rs` - `ProductContract::mutate_op()` |
//!
//! ## Authorization
//!
//! | Operation | Organization |
//! |-----------|--------------|
//! | `InitLedger`, `CreateProduct`, `UpdateProduct`, `ProductAccept`, `ProductShip`, `ProductDeliver` | manufacturer (`Org1MSP`) |
//! | `ProductOrder` | consumer (`Org2MSP`) |
//! | reads and queries | any |
//!
//! `UpdateProduct` and `ProductDeliver` additionally require the supplied
//! manufacturer to match the stored one.
//!
//! ## Outbound Dependencies
//!
//! | Crate | Trait | Purpose |
//! |-------|-------|---------|
//! | `sc-01-ledger-store` | `LedgerStore` | World state, range scans, revision history |
//! | `shared-types` | `IdentityResolver` | Caller organization |
//!
//! ## Usage Example
//!
//! ```
//! use sc_02_product_lifecycle::prelude::*;
//! use shared_types::ClientIdentity;
//!
//! let mut contract = create_test_contract();
//! let manufacturer = ClientIdentity::new("Org1MSP");
//!
//! contract
//!     .create_product(
//!         &manufacturer,
//!         NewProduct {
//!             id: "42".into(),
//!             name: "Widget".into(),
//!             description: "desc".into(),
//!             price: "9.99".into(),
//!             manufacturer: "ManuA".into(),
//!             created_date: "2024-01-01".into(),
//!         },
//!     )
//!     .unwrap();
//!
//! assert_eq!(contract.get_product_status(&manufacturer, "42").unwrap(), "Pending");
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod history;
pub mod ports;
pub mod query;
pub mod repository;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::{ConfigError, ContractConfig};
    pub use crate::domain::{
        AccessGuard, ContractOperation, NewProduct, ProductRecord, ProductStatus, ProductUpdate,
        Transition,
    };
    pub use crate::errors::{CodecError, ContractError, ContractResult, ErrorKind};
    pub use crate::history::HistoryEntry;
    pub use crate::ports::inbound::ProductLifecycleApi;
    pub use crate::query::ProductView;
    pub use crate::service::{create_test_contract, ContractStats, ProductContract};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const SUBSYSTEM_ID: u8 = 2;

pub const SUBSYSTEM_NAME: &str = "Product Lifecycle";
