//! # Caller Identity
//!
//! The Identity Resolver port. The host platform extracts the caller's
//! organization from its credential; the contract only consumes the result.
//!
//! ## Usage
//!
//! ```rust
//! use shared_types::{ClientIdentity, IdentityResolver, OrganizationId};
//!
//! let caller = ClientIdentity::new("Org1MSP");
//! let org = caller.current_caller_organization().unwrap();
//! assert_eq!(org, OrganizationId::from("Org1MSP"));
//! ```

use crate::entities::OrganizationId;
use crate::errors::IdentityError;

/// Resolves the organization of whoever invoked the current operation.
///
/// Implemented by the host platform adapter. Called once per public
/// operation, before any access check.
pub trait IdentityResolver {
    /// Organization of the invoking principal.
    fn current_caller_organization(&self) -> Result<OrganizationId, IdentityError>;
}

/// Identity already resolved by the host, or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    organization: Option<OrganizationId>,
}

impl ClientIdentity {
    /// Caller belonging to `organization`.
    pub fn new(organization: impl Into<OrganizationId>) -> Self {
        Self {
            organization: Some(organization.into()),
        }
    }

    /// Invocation with no credential attached.
    pub fn anonymous() -> Self {
        Self { organization: None }
    }
}

impl IdentityResolver for ClientIdentity {
    fn current_caller_organization(&self) -> Result<OrganizationId, IdentityError> {
        match &self.organization {
            Some(org) if org.is_empty() => {
                tracing::debug!("client credential carries an empty MSP id");
                Err(IdentityError::NoOrganization(String::new()))
            }
            Some(org) => Ok(org.clone()),
            None => Err(IdentityError::MissingCredential),
        }
    }
}

impl<T: IdentityResolver + ?Sized> IdentityResolver for &T {
    fn current_caller_organization(&self) -> Result<OrganizationId, IdentityError> {
        (**self).current_caller_organization()
    }
}
