//! # Lifecycle State Machine
//!
//! Status transitions of an existing product. Creation is not a transition:
//! it requires the record to be absent and is handled by the repository.
//!
//! | Transition | Forbidden from | Result | Side effects |
//! |------------|----------------|--------|--------------|
//! | Order | Accepted, Delivered | Pending Order Request | Consumer, ModifiedDate |
//! | Accept | Accepted, Delivered | Accepted | none |
//! | Ship | Shipped, Delivered | Shipped | ModifiedDate |
//! | Deliver | none (ownership checked) | Delivered | DeliveredDate, ModifiedDate |
//! | Update | none (ownership checked) | unchanged | Name, Description, Price, ModifiedDate |
//!
//! `Accept` leaves ModifiedDate untouched.

use crate::domain::access::ContractOperation;
use crate::domain::entities::{ProductRecord, ProductStatus, ProductUpdate};
use crate::errors::ContractError;

/// A requested change to an existing product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Consumer places an order.
    Order {
        consumer: String,
        modified_date: String,
    },
    /// Manufacturer accepts the pending order.
    Accept,
    Ship {
        modified_date: String,
    },
    Deliver {
        manufacturer: String,
        delivered_date: String,
    },
    /// Attribute update by the owning manufacturer.
    Update {
        name: String,
        description: String,
        price: String,
        manufacturer: String,
        modified_date: String,
    },
}

impl From<ProductUpdate> for Transition {
    fn from(update: ProductUpdate) -> Self {
        Transition::Update {
            name: update.name,
            description: update.description,
            price: update.price,
            manufacturer: update.manufacturer,
            modified_date: update.modified_date,
        }
    }
}

impl Transition {
    /// Operation that requests this transition.
    pub fn operation(&self) -> ContractOperation {
        match self {
            Transition::Order { .. } => ContractOperation::ProductOrder,
            Transition::Accept => ContractOperation::ProductAccept,
            Transition::Ship { .. } => ContractOperation::ProductShip,
            Transition::Deliver { .. } => ContractOperation::ProductDeliver,
            Transition::Update { .. } => ContractOperation::UpdateProduct,
        }
    }

    /// Statuses from which this transition is rejected.
    pub fn forbidden_from(&self) -> &'static [ProductStatus] {
        match self {
            Transition::Order { .. } | Transition::Accept => {
                &[ProductStatus::Accepted, ProductStatus::Delivered]
            }
            Transition::Ship { .. } => &[ProductStatus::Shipped, ProductStatus::Delivered],
            Transition::Deliver { .. } | Transition::Update { .. } => &[],
        }
    }

    /// Status after the transition, given the current one.
    pub fn target(&self, current: ProductStatus) -> ProductStatus {
        match self {
            Transition::Order { .. } => ProductStatus::PendingOrderRequest,
            Transition::Accept => ProductStatus::Accepted,
            Transition::Ship { .. } => ProductStatus::Shipped,
            Transition::Deliver { .. } => ProductStatus::Delivered,
            Transition::Update { .. } => current,
        }
    }

    /// True if the transition may run from `status`.
    pub fn is_allowed_from(&self, status: ProductStatus) -> bool {
        !self.forbidden_from().contains(&status)
    }

    /// Manufacturer the caller claims to be, for ownership-checked transitions.
    fn claimed_manufacturer(&self) -> Option<&str> {
        match self {
            Transition::Deliver { manufacturer, .. } | Transition::Update { manufacturer, .. } => {
                Some(manufacturer.as_str())
            }
            _ => None,
        }
    }

    /// Validate against `current` and produce the next record.
    ///
    /// `current` is not modified; on error nothing is to be written.
    pub fn apply(self, current: &ProductRecord) -> Result<ProductRecord, ContractError> {
        let operation = self.operation();

        if let Some(claimed) = self.claimed_manufacturer() {
            if claimed != current.manufacturer {
                return Err(ContractError::OwnershipMismatch {
                    id: current.id.clone(),
                    operation,
                });
            }
        }
        if !self.is_allowed_from(current.status) {
            return Err(ContractError::InvalidTransition {
                id: current.id.clone(),
                from: current.status,
                operation,
            });
        }

        let mut next = current.clone();
        next.status = self.target(current.status);
        match self {
            Transition::Order {
                consumer,
                modified_date,
            } => {
                next.consumer = consumer;
                next.modified_date = modified_date;
            }
            Transition::Accept => {}
            Transition::Ship { modified_date } => {
                next.modified_date = modified_date;
            }
            Transition::Deliver { delivered_date, .. } => {
                next.modified_date = delivered_date.clone();
                next.delivered_date = delivered_date;
            }
            Transition::Update {
                name,
                description,
                price,
                modified_date,
                ..
            } => {
                next.name = name;
                next.description = description;
                next.price = price;
                next.modified_date = modified_date;
            }
        }
        Ok(next)
    }
}
