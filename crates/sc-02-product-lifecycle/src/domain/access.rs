//! # Access Control
//!
//! Per-operation organization ACL. Every public operation names itself as a
//! [`ContractOperation`]; the guard maps it to the organization allowed to
//! invoke it.
//!
//! | Operation | Allowed organization |
//! |-----------|----------------------|
//! | InitLedger, CreateProduct, UpdateProduct, ProductDeliver, ProductAccept, ProductShip | manufacturer |
//! | ProductOrder | consumer |
//! | all reads and queries | any |

use shared_types::{OrgRole, OrganizationId};
use std::fmt;

use crate::errors::ContractError;

/// Public operations of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractOperation {
    InitLedger,
    CreateProduct,
    UpdateProduct,
    ProductOrder,
    ProductDeliver,
    ProductAccept,
    ProductShip,
    ProductExists,
    ReadProduct,
    GetAllProducts,
    GetProductsByManufacturer,
    GetConsumerOrderedProductList,
    GetOrderRequestedProductList,
    GetProductStatus,
    VerifyProductAuthenticity,
    TrackProductHistory,
}

impl ContractOperation {
    /// Invocation name, also used as the `operation` metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            ContractOperation::InitLedger => "InitLedger",
            ContractOperation::CreateProduct => "CreateProduct",
            ContractOperation::UpdateProduct => "UpdateProduct",
            ContractOperation::ProductOrder => "ProductOrder",
            ContractOperation::ProductDeliver => "ProductDeliver",
            ContractOperation::ProductAccept => "ProductAccept",
            ContractOperation::ProductShip => "ProductShip",
            ContractOperation::ProductExists => "ProductExists",
            ContractOperation::ReadProduct => "ReadProduct",
            ContractOperation::GetAllProducts => "GetAllProducts",
            ContractOperation::GetProductsByManufacturer => "GetProductsByManufacturer",
            ContractOperation::GetConsumerOrderedProductList => "GetConsumerOrderedProductList",
            ContractOperation::GetOrderRequestedProductList => "GetOrderRequestedProductList",
            ContractOperation::GetProductStatus => "GetProductStatus",
            ContractOperation::VerifyProductAuthenticity => "VerifyProductAuthenticity",
            ContractOperation::TrackProductHistory => "TrackProductHistory",
        }
    }

    /// Organization role required to invoke the operation, `None` for reads.
    pub fn required_role(self) -> Option<OrgRole> {
        match self {
            ContractOperation::InitLedger
            | ContractOperation::CreateProduct
            | ContractOperation::UpdateProduct
            | ContractOperation::ProductDeliver
            | ContractOperation::ProductAccept
            | ContractOperation::ProductShip => Some(OrgRole::Manufacturer),
            ContractOperation::ProductOrder => Some(OrgRole::Consumer),
            _ => None,
        }
    }

    /// True for operations that write to the ledger.
    pub fn is_mutation(self) -> bool {
        self.required_role().is_some()
    }
}

impl fmt::Display for ContractOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organization-level access guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard {
    manufacturer: OrganizationId,
    consumer: OrganizationId,
}

impl AccessGuard {
    pub fn new(manufacturer: OrganizationId, consumer: OrganizationId) -> Self {
        Self {
            manufacturer,
            consumer,
        }
    }

    /// Organization acting in `role`.
    pub fn organization_for(&self, role: OrgRole) -> &OrganizationId {
        match role {
            OrgRole::Manufacturer => &self.manufacturer,
            OrgRole::Consumer => &self.consumer,
        }
    }

    /// Allow or deny `operation` for `caller`.
    pub fn authorize(
        &self,
        operation: ContractOperation,
        caller: &OrganizationId,
    ) -> Result<(), ContractError> {
        match operation.required_role() {
            None => Ok(()),
            Some(role) if self.organization_for(role) == caller => Ok(()),
            Some(role) => {
                tracing::warn!(
                    operation = %operation,
                    caller_org = %caller,
                    required = %role,
                    "access denied"
                );
                Err(ContractError::AuthorizationDenied {
                    operation,
                    caller_org: caller.to_string(),
                })
            }
        }
    }
}
