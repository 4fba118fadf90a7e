//! # Domain Entities
//!
//! The product record and its lifecycle status.

use std::fmt;
use std::str::FromStr;

use crate::errors::CodecError;

/// Placeholder stored in string fields that have not been set yet.
pub const UNSET: &str = "null";

// =============================================================================
// PRODUCT STATUS
// =============================================================================

/// Lifecycle state of a product.
///
/// `Created` is only produced by the bootstrap seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductStatus {
    /// Seeded by `InitLedger`.
    Created,
    /// Created by the manufacturer, not yet ordered.
    Pending,
    /// A consumer has proposed an order.
    PendingOrderRequest,
    /// The manufacturer accepted the order.
    Accepted,
    /// The product left the manufacturer.
    Shipped,
    /// The product reached the consumer.
    Delivered,
}

impl ProductStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ProductStatus; 6] = [
        ProductStatus::Created,
        ProductStatus::Pending,
        ProductStatus::PendingOrderRequest,
        ProductStatus::Accepted,
        ProductStatus::Shipped,
        ProductStatus::Delivered,
    ];

    /// Text stored on the ledger.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Created => "Created",
            ProductStatus::Pending => "Pending",
            ProductStatus::PendingOrderRequest => "Pending Order Request",
            ProductStatus::Accepted => "Accepted",
            ProductStatus::Shipped => "Shipped",
            ProductStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CodecError::UnknownStatus(s.to_string()))
    }
}

// =============================================================================
// PRODUCT RECORD
// =============================================================================

/// The persisted product entity, one per product id.
///
/// Encoding lives in `domain::codec`; the field order there is part of the
/// ledger format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// Primary key and ledger key.
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub status: ProductStatus,
    /// Set once at creation.
    pub manufacturer: String,
    /// `"null"` until an order is placed.
    pub consumer: String,
    pub created_date: String,
    pub modified_date: String,
    pub delivered_date: String,
    /// Copy of the id, kept for ledger compatibility.
    pub owner_type: String,
}

/// Caller-supplied fields of a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub manufacturer: String,
    pub created_date: String,
}

/// Caller-supplied fields of a manufacturer update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    /// Must match the stored manufacturer.
    pub manufacturer: String,
    pub modified_date: String,
}

impl ProductRecord {
    /// Record produced by `CreateProduct`.
    pub fn pending(product: NewProduct) -> Self {
        Self {
            owner_type: product.id.clone(),
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            status: ProductStatus::Pending,
            manufacturer: product.manufacturer,
            consumer: UNSET.to_string(),
            created_date: product.created_date,
            modified_date: UNSET.to_string(),
            delivered_date: UNSET.to_string(),
        }
    }

    /// Bootstrap record in `Created` state with no manufacturer.
    pub fn seed(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: String::new(),
            status: ProductStatus::Created,
            manufacturer: UNSET.to_string(),
            consumer: UNSET.to_string(),
            created_date: UNSET.to_string(),
            modified_date: String::new(),
            delivered_date: UNSET.to_string(),
            owner_type: String::new(),
        }
    }

    /// True once a consumer has placed an order.
    pub fn has_consumer(&self) -> bool {
        self.consumer != UNSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            id: "42".to_string(),
            name: "Widget".to_string(),
            description: "desc".to_string(),
            price: "9.99".to_string(),
            manufacturer: "ManuA".to_string(),
            created_date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_status_text_roundtrip() {
        for status in ProductStatus::ALL {
            assert_eq!(status.as_str().parse::<ProductStatus>().unwrap(), status);
        }
        assert_eq!(
            ProductStatus::PendingOrderRequest.to_string(),
            "Pending Order Request"
        );
    }

    #[test]
    fn test_unknown_status_text() {
        assert_eq!(
            "Ordered".parse::<ProductStatus>(),
            Err(CodecError::UnknownStatus("Ordered".to_string()))
        );
        assert!("pending".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_pending_record_defaults() {
        let record = ProductRecord::pending(widget());
        assert_eq!(record.status, ProductStatus::Pending);
        assert_eq!(record.manufacturer, "ManuA");
        assert_eq!(record.consumer, UNSET);
        assert_eq!(record.modified_date, UNSET);
        assert_eq!(record.delivered_date, UNSET);
        assert_eq!(record.owner_type, "42");
        assert!(!record.has_consumer());
    }

    #[test]
    fn test_seed_record() {
        let record = ProductRecord::seed("1", "apple", "good");
        assert_eq!(record.status, ProductStatus::Created);
        assert_eq!(record.manufacturer, UNSET);
        assert_eq!(record.price, "");
        assert_eq!(record.owner_type, "");
    }
}
