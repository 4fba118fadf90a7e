//! # Domain Invariants
//!
//! Properties every committed write must preserve, checked against the
//! record before and after a transition.
//!
//! - Product id never changes
//! - Manufacturer is set once, at creation
//! - Consumer, once set, is never reset to `"null"` except by a new order
//! - No direct move from Accepted/Delivered back to Pending/Pending Order Request

use crate::domain::access::ContractOperation;
use crate::domain::entities::{ProductRecord, ProductStatus};

/// Product id is unchanged.
#[must_use]
pub fn check_identity_invariant(before: &ProductRecord, after: &ProductRecord) -> bool {
    before.id == after.id
}

/// Manufacturer is unchanged.
#[must_use]
pub fn check_manufacturer_invariant(before: &ProductRecord, after: &ProductRecord) -> bool {
    before.manufacturer == after.manufacturer
}

/// An ordered product keeps a consumer.
#[must_use]
pub fn check_consumer_invariant(before: &ProductRecord, after: &ProductRecord) -> bool {
    !before.has_consumer() || after.has_consumer()
}

/// Status does not fall back from a committed order.
#[must_use]
pub fn check_forward_only_invariant(before: ProductStatus, after: ProductStatus) -> bool {
    let committed = matches!(before, ProductStatus::Accepted | ProductStatus::Delivered);
    let reopened = matches!(
        after,
        ProductStatus::Pending | ProductStatus::PendingOrderRequest
    );
    !(committed && reopened)
}

/// Names of the invariants violated when `operation` turns `before` into
/// `after`. Empty when all hold.
///
/// `ProductOrder` assigns the consumer it is given, so the consumer rule
/// applies to every other operation only.
#[must_use]
pub fn violated_invariants(
    operation: ContractOperation,
    before: &ProductRecord,
    after: &ProductRecord,
) -> Vec<&'static str> {
    let mut violated = Vec::new();
    if !check_identity_invariant(before, after) {
        violated.push("identity");
    }
    if !check_manufacturer_invariant(before, after) {
        violated.push("manufacturer");
    }
    if operation != ContractOperation::ProductOrder && !check_consumer_invariant(before, after) {
        violated.push("consumer");
    }
    if !check_forward_only_invariant(before.status, after.status) {
        violated.push("forward_only");
    }
    violated
}
