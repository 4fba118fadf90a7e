//! # Driving Ports (API - Inbound)
//!
//! The public operation surface of the product lifecycle contract. A host
//! adapter maps each incoming invocation onto one method, passing the
//! resolver for the invoking principal.

use shared_types::IdentityResolver;

use crate::domain::entities::{NewProduct, ProductRecord, ProductUpdate};
use crate::errors::ContractResult;

/// Product lifecycle contract API.
///
/// Mutations take `&mut self`; the host runs one invocation at a time.
/// Read operations accept any caller.
pub trait ProductLifecycleApi {
    /// Write the bootstrap products. Manufacturer only.
    fn init_ledger(&mut self, caller: &dyn IdentityResolver) -> ContractResult<()>;

    /// True if a record is stored under `id`.
    fn product_exists(&self, caller: &dyn IdentityResolver, id: &str) -> ContractResult<bool>;

    /// Create a `Pending` product. Manufacturer only; fails if `id` exists.
    fn create_product(
        &mut self,
        caller: &dyn IdentityResolver,
        product: NewProduct,
    ) -> ContractResult<()>;

    /// Replace name, description and price. Manufacturer only, own products only.
    fn update_product(
        &mut self,
        caller: &dyn IdentityResolver,
        update: ProductUpdate,
    ) -> ContractResult<()>;

    /// Place an order for `id` on behalf of `new_owner`. Consumer only.
    fn product_order(
        &mut self,
        caller: &dyn IdentityResolver,
        id: &str,
        new_owner: &str,
        modified_date: &str,
    ) -> ContractResult<()>;

    /// Mark `id` delivered. Manufacturer only, own products only.
    fn product_deliver(
        &mut self,
        caller: &dyn IdentityResolver,
        id: &str,
        manufacturer: &str,
        delivered_date: &str,
    ) -> ContractResult<()>;

    /// Accept the pending order for `id`. Manufacturer only.
    ///
    /// `manufacturer` and `modified_date` are accepted for call compatibility;
    /// neither is checked nor stored.
    fn product_accept(
        &mut self,
        caller: &dyn IdentityResolver,
        id: &str,
        manufacturer: &str,
        modified_date: &str,
    ) -> ContractResult<()>;

    /// Mark `id` shipped. Manufacturer only.
    fn product_ship(
        &mut self,
        caller: &dyn IdentityResolver,
        id: &str,
        modified_date: &str,
    ) -> ContractResult<()>;

    /// Current record of `id`; `NotFound` if absent.
    fn read_product(&self, caller: &dyn IdentityResolver, id: &str)
        -> ContractResult<ProductRecord>;

    fn get_all_products(&self, caller: &dyn IdentityResolver) -> ContractResult<Vec<ProductRecord>>;

    fn get_products_by_manufacturer(
        &self,
        caller: &dyn IdentityResolver,
        manufacturer: &str,
    ) -> ContractResult<Vec<ProductRecord>>;

    /// Products ordered by `user_name`.
    fn get_consumer_ordered_product_list(
        &self,
        caller: &dyn IdentityResolver,
        user_name: &str,
    ) -> ContractResult<Vec<ProductRecord>>;

    /// Products of manufacturer `user_name` awaiting acceptance.
    fn get_order_requested_product_list(
        &self,
        caller: &dyn IdentityResolver,
        user_name: &str,
    ) -> ContractResult<Vec<ProductRecord>>;

    /// Status text of `id`; `NotFound` if absent.
    fn get_product_status(&self, caller: &dyn IdentityResolver, id: &str)
        -> ContractResult<String>;

    /// True if `id` exists. Absence is `false`, not an error.
    fn verify_product_authenticity(
        &self,
        caller: &dyn IdentityResolver,
        id: &str,
    ) -> ContractResult<bool>;

    /// Every revision of `id`, oldest first. Empty for unknown ids.
    fn track_product_history(
        &self,
        caller: &dyn IdentityResolver,
        id: &str,
    ) -> ContractResult<Vec<ProductRecord>>;
}
