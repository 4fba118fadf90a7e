//! # Error Types
//!
//! Errors raised while resolving the caller of an invocation.

use thiserror::Error;

/// The host platform could not tell who is calling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// No client credential is attached to the invocation.
    #[error("no client identity attached to the invocation")]
    MissingCredential,

    /// The credential was present but carried no usable MSP id.
    #[error("client identity has no organization: {0}")]
    NoOrganization(String),
}
