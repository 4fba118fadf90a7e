//! # Organization Entities
//!
//! Identifiers for the trust domains that take part in the product lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership service provider id of an organization (e.g. `Org1MSP`).
///
/// Compared by exact string equality; no normalisation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Wrap a raw MSP id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw MSP id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty id, which never matches a configured organization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrganizationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OrganizationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The two parties of the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrgRole {
    /// Creates, updates, accepts, ships and delivers products.
    Manufacturer,
    /// Places orders.
    Consumer,
}

impl OrgRole {
    /// Human readable role name used in denial messages.
    pub fn as_str(self) -> &'static str {
        match self {
            OrgRole::Manufacturer => "manufacturer",
            OrgRole::Consumer => "consumer",
        }
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
