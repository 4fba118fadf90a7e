//! # Error Types
//!
//! All error types for the product lifecycle contract.

use sc_01_ledger_store::LedgerError;
use shared_types::IdentityError;
use thiserror::Error;

use crate::domain::access::ContractOperation;
use crate::domain::entities::ProductStatus;

// =============================================================================
// CODEC ERRORS
// =============================================================================

/// Errors decoding a stored product record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The bytes are not a well-formed product record.
    #[error("malformed product record: {0}")]
    Malformed(String),

    /// Status text outside the closed set.
    #[error("unknown product status: {0:?}")]
    UnknownStatus(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Malformed(err.to_string())
    }
}

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Errors returned by contract operations.
///
/// Every variant is terminal for the invocation; nothing has been written
/// when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Caller organization may not invoke the operation.
    #[error("access denied: organization {caller_org} may not execute {operation}")]
    AuthorizationDenied {
        operation: ContractOperation,
        caller_org: String,
    },

    #[error("the product {id} does not exist")]
    NotFound { id: String },

    #[error("the product {id} already exists")]
    AlreadyExists { id: String },

    /// Current status forbids the operation.
    #[error("product {id} is {from}, {operation} is not allowed")]
    InvalidTransition {
        id: String,
        from: ProductStatus,
        operation: ContractOperation,
    },

    /// Supplied manufacturer differs from the stored one.
    #[error("{operation} on product {id}: you may only modify your own products")]
    OwnershipMismatch {
        id: String,
        operation: ContractOperation,
    },

    #[error("ledger store failure: {0}")]
    Store(#[from] LedgerError),

    #[error("failed to decode product {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: CodecError,
    },

    #[error("caller identity unavailable: {0}")]
    Identity(#[from] IdentityError),
}

impl ContractError {
    /// Flat classification, used as a metric label.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::AuthorizationDenied { .. } => ErrorKind::AuthorizationDenied,
            ContractError::NotFound { .. } => ErrorKind::NotFound,
            ContractError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            ContractError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            ContractError::OwnershipMismatch { .. } => ErrorKind::OwnershipMismatch,
            ContractError::Store(_) => ErrorKind::StoreFailure,
            ContractError::Decode { .. } => ErrorKind::DecodeFailure,
            ContractError::Identity(_) => ErrorKind::Identity,
        }
    }

    /// True for errors raised by the access or ownership checks.
    pub fn is_denial(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::AuthorizationDenied | ErrorKind::OwnershipMismatch | ErrorKind::Identity
        )
    }

    pub(crate) fn decode(id: impl Into<String>, source: CodecError) -> Self {
        ContractError::Decode {
            id: id.into(),
            source,
        }
    }
}

/// Classification of [`ContractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AuthorizationDenied,
    NotFound,
    AlreadyExists,
    InvalidTransition,
    OwnershipMismatch,
    StoreFailure,
    DecodeFailure,
    Identity,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::AuthorizationDenied => "authorization_denied",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::InvalidTransition => "invalid_transition",
            ErrorKind::OwnershipMismatch => "ownership_mismatch",
            ErrorKind::StoreFailure => "store_failure",
            ErrorKind::DecodeFailure => "decode_failure",
            ErrorKind::Identity => "identity",
        }
    }
}

/// Result alias for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;
