//! # Shared Types Crate
//!
//! Organization identity types shared across the supply-chain workspace.
//!
//! ## Design Principles
//!
//! - **Resolved Identity Only**: Credential parsing happens in the host
//!   platform. This crate only models the organization identifier that the
//!   host hands back for the current invocation.
//! - **Explicit Identity**: The resolved organization is passed as a value into
//!   access checks, never read from global state.

pub mod entities;
pub mod errors;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use security::*;
