//! # Domain Layer
//!
//! Record model, ledger encoding, access control and the lifecycle state
//! machine. Nothing in here touches the store.

pub mod access;
pub mod codec;
pub mod entities;
pub mod invariants;
pub mod transitions;

pub use access::{AccessGuard, ContractOperation};
pub use codec::{decode_record, encode_record, FIELD_ORDER};
pub use entities::{NewProduct, ProductRecord, ProductStatus, ProductUpdate, UNSET};
pub use invariants::violated_invariants;
pub use transitions::Transition;
