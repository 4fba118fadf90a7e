//! # Ports Layer
//!
//! - **Driving Port (Inbound)**: `ProductLifecycleApi`
//! - **Driven Ports (Outbound)**: `LedgerStore`, `IdentityResolver`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
