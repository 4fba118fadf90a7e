//! # Product Contract Service
//!
//! Implements [`ProductLifecycleApi`] over any [`LedgerStore`].
//!
//! Every mutation runs the same pipeline:
//!
//! 1. Resolve the caller organization
//! 2. Organization ACL (`AccessGuard`)
//! 3. Load the current record (`NotFound` if absent)
//! 4. Validate and apply the transition
//! 5. Write the new record
//!
//! Steps 1-4 never write, so a rejected invocation leaves the ledger as it
//! was. Reads skip the ACL; the caller is resolved only for the log line.

use std::sync::atomic::{AtomicU64, Ordering};

use sc_01_ledger_store::LedgerStore;
use shared_types::{IdentityResolver, OrganizationId};
use tracing::{debug, error, info, instrument, warn};

use crate::config::{ConfigError, ContractConfig};
use crate::domain::access::{AccessGuard, ContractOperation};
use crate::domain::entities::{NewProduct, ProductRecord, ProductUpdate};
use crate::domain::invariants::violated_invariants;
use crate::domain::transitions::Transition;
use crate::errors::{ContractError, ContractResult};
use crate::history::{track_history, HistoryEntry};
use crate::ports::inbound::ProductLifecycleApi;
use crate::query::{query, ProductView};
use crate::repository::ProductRepository;

/// Snapshot of service counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContractStats {
    /// Operations invoked, successful or not.
    pub invocations: u64,
    /// Mutations that committed a write.
    pub successful_mutations: u64,
    /// Invocations refused by the ACL, an ownership check or identity resolution.
    pub rejected_requests: u64,
    /// Invocations that failed for any other reason.
    pub failed_requests: u64,
}

#[derive(Debug, Default)]
struct StatsCounters {
    invocations: AtomicU64,
    successful_mutations: AtomicU64,
    rejected_requests: AtomicU64,
    failed_requests: AtomicU64,
}

/// The product lifecycle contract.
#[derive(Debug)]
pub struct ProductContract<S: LedgerStore> {
    config: ContractConfig,
    guard: AccessGuard,
    repository: ProductRepository<S>,
    stats: StatsCounters,
}

impl<S: LedgerStore> ProductContract<S> {
    /// Create a contract over `store`, rejecting an invalid configuration.
    pub fn new(store: S, config: ContractConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let guard = AccessGuard::new(config.manufacturer_msp.clone(), config.consumer_msp.clone());
        info!(
            manufacturer = %config.manufacturer_msp,
            consumer = %config.consumer_msp,
            "product contract ready"
        );
        Ok(Self {
            config,
            guard,
            repository: ProductRepository::new(store),
            stats: StatsCounters::default(),
        })
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Underlying ledger store.
    pub fn store(&self) -> &S {
        self.repository.store()
    }

    pub fn into_store(self) -> S {
        self.repository.into_store()
    }

    /// Current service counters.
    pub fn stats(&self) -> ContractStats {
        ContractStats {
            invocations: self.stats.invocations.load(Ordering::Relaxed),
            successful_mutations: self.stats.successful_mutations.load(Ordering::Relaxed),
            rejected_requests: self.stats.rejected_requests.load(Ordering::Relaxed),
            failed_requests: self.stats.failed_requests.load(Ordering::Relaxed),
        }
    }

    /// Every revision of `id` with its revision number and write id.
    #[instrument(skip(self, caller), fields(product_id = %id))]
    pub fn track_product_history_entries(
        &self,
        caller: &dyn IdentityResolver,
        id: &str,
    ) -> ContractResult<Vec<HistoryEntry>> {
        self.read_op(ContractOperation::TrackProductHistory, caller, |contract| {
            track_history(contract.repository.store(), id)
        })
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    /// Resolve the caller and apply the ACL for a mutation.
    fn admit(
        &self,
        operation: ContractOperation,
        caller: &dyn IdentityResolver,
    ) -> ContractResult<OrganizationId> {
        let org = caller.current_caller_organization().map_err(|e| {
            warn!(operation = %operation, error = %e, "caller identity unavailable");
            ContractError::from(e)
        })?;
        self.guard.authorize(operation, &org)?;
        Ok(org)
    }

    /// Run a read operation. Reads are open to every caller.
    fn read_op<T>(
        &self,
        operation: ContractOperation,
        caller: &dyn IdentityResolver,
        body: impl FnOnce(&Self) -> ContractResult<T>,
    ) -> ContractResult<T> {
        match caller.current_caller_organization() {
            Ok(org) => debug!(operation = %operation, caller_org = %org, "read"),
            Err(e) => debug!(operation = %operation, error = %e, "read by unresolved caller"),
        }
        let result = body(self);
        self.record_outcome(operation, &result);
        result
    }

    /// Run a mutation after resolving and authorizing the caller.
    fn mutate_op<T>(
        &mut self,
        operation: ContractOperation,
        caller: &dyn IdentityResolver,
        body: impl FnOnce(&mut Self, &OrganizationId) -> ContractResult<T>,
    ) -> ContractResult<T> {
        let result = self
            .admit(operation, caller)
            .and_then(|org| body(self, &org));
        self.record_outcome(operation, &result);
        result
    }

    /// Load, transition and write one record.
    fn transition(&mut self, id: &str, transition: Transition) -> ContractResult<ProductRecord> {
        let operation = transition.operation();
        let current = self.repository.read(id)?;
        let next = transition.apply(&current)?;

        let violated = violated_invariants(operation, &current, &next);
        if !violated.is_empty() {
            error!(product_id = id, operation = %operation, ?violated, "transition would break invariants");
            return Err(ContractError::InvalidTransition {
                id: id.to_string(),
                from: current.status,
                operation,
            });
        }

        self.repository.save(&next)?;
        Ok(next)
    }

    fn record_outcome<T>(&self, operation: ContractOperation, result: &ContractResult<T>) {
        self.stats.invocations.fetch_add(1, Ordering::Relaxed);
        let outcome = match result {
            Ok(_) => {
                if operation.is_mutation() {
                    self.stats.successful_mutations.fetch_add(1, Ordering::Relaxed);
                }
                "ok"
            }
            Err(e) if e.is_denial() => {
                self.stats.rejected_requests.fetch_add(1, Ordering::Relaxed);
                "denied"
            }
            Err(_) => {
                self.stats.failed_requests.fetch_add(1, Ordering::Relaxed);
                "failed"
            }
        };
        if let Err(e) = result {
            supply_telemetry::metric_inc!(
                supply_telemetry::CONTRACT_ERRORS,
                &[operation.as_str(), e.kind().as_str()]
            );
            debug!(operation = %operation, error = %e, "operation failed");
        }
        supply_telemetry::metric_inc!(
            supply_telemetry::CONTRACT_INVOCATIONS,
            &[operation.as_str(), outcome]
        );
    }
}

impl<S: LedgerStore> ProductLifecycleApi for ProductContract<S> {
    #[instrument(skip(self, caller))]
    fn init_ledger(&mut self, caller: &dyn IdentityResolver) -> ContractResult<()> {
        self.mutate_op(ContractOperation::InitLedger, caller, |contract, _| {
            let seeds = contract.config.seed_products.clone();
            for seed in &seeds {
                contract.repository.save(seed)?;
            }
            info!(seeded = seeds.len(), "ledger initialized");
            Ok(())
        })
    }

    #[instrument(skip(self, caller), fields(product_id = %id))]
    fn product_exists(&self, caller: &dyn IdentityResolver, id: &str) -> ContractResult<bool> {
        self.read_op(ContractOperation::ProductExists, caller, |contract| {
            contract.repository.exists(id)
        })
    }

    #[instrument(skip(self, caller, product), fields(product_id = %product.id))]
    fn create_product(
        &mut self,
        caller: &dyn IdentityResolver,
        product: NewProduct,
    ) -> ContractResult<()> {
        self.mutate_op(ContractOperation::CreateProduct, caller, |contract, org| {
            let record = ProductRecord::pending(product);
            contract.repository.create(&record)?;
            supply_telemetry::log_product_event!(
                info,
                ContractOperation::CreateProduct,
                "product created",
                record.id,
                manufacturer = %record.manufacturer,
                caller_org = %org
            );
            Ok(())
        })
    }

    #[instrument(skip(self, caller, update), fields(product_id = %update.id))]
    fn update_product(
        &mut self,
        caller: &dyn IdentityResolver,
        update: ProductUpdate,
    ) -> ContractResult<()> {
        self.mutate_op(ContractOperation::UpdateProduct, caller, |contract, _| {
            let id = update.id.clone();
            contract.transition(&id, Transition::from(update))?;
            info!(product_id = %id, "product updated");
            Ok(())
        })
    }

    #[instrument(skip(self, caller), fields(product_id = %id))]
    fn product_order(
        &mut self,
        caller: &dyn IdentityResolver,
        id: &str,
        new_owner: &str,
        modified_date: &str,
    ) -> ContractResult<()> {
        self.mutate_op(ContractOperation::ProductOrder, caller, |contract, _| {
            let transition = Transition::Order {
                consumer: new_owner.to_string(),
                modified_date: modified_date.to_string(),
            };
            let next = contract.transition(id, transition)?;
            info!(product_id = id, consumer = %next.consumer, "order requested");
            Ok(())
        })
    }

    #[instrument(skip(self, caller), fields(product_id = %id))]
    fn product_deliver(
        &mut self,
        caller: &dyn IdentityResolver,
        id: &str,
        manufacturer: &str,
        delivered_date: &str,
    ) -> ContractResult<()> {
        self.mutate_op(ContractOperation::ProductDeliver, caller, |contract, _| {
            let transition = Transition::Deliver {
                manufacturer: manufacturer.to_string(),
                delivered_date: delivered_date.to_string(),
            };
            contract.transition(id, transition)?;
            info!(product_id = id, delivered_date, "product delivered");
            Ok(())
        })
    }

    #[instrument(skip(self, caller), fields(product_id = %id))]
    fn product_accept(
        &mut self,
        caller: &dyn IdentityResolver,
        id: &str,
        manufacturer: &str,
        modified_date: &str,
    ) -> ContractResult<()> {
        self.mutate_op(ContractOperation::ProductAccept, caller, |contract, _| {
            contract.transition(id, Transition::Accept)?;
            info!(product_id = id, manufacturer, modified_date, "order accepted");
            Ok(())
        })
    }

    #[instrument(skip(self, caller), fields(product_id = %id))]
    fn product_ship(
        &mut self,
        caller: &dyn IdentityResolver,
        id: &str,
        modified_date: &str,
    ) -> ContractResult<()> {
        self.mutate_op(ContractOperation::ProductShip, caller, |contract, _| {
            let transition = Transition::Ship {
                modified_date: modified_date.to_string(),
            };
            contract.transition(id, transition)?;
            info!(product_id = id, "product shipped");
            Ok(())
        })
    }

    #[instrument(skip(self, caller), fields(product_id = %id))]
    fn read_product(
        &self,
        caller: &dyn IdentityResolver,
        id: &str,
    ) -> ContractResult<ProductRecord> {
        self.read_op(ContractOperation::ReadProduct, caller, |contract| {
            contract.repository.read(id)
        })
    }

    #[instrument(skip(self, caller))]
    fn get_all_products(&self, caller: &dyn IdentityResolver) -> ContractResult<Vec<ProductRecord>> {
        self.read_op(ContractOperation::GetAllProducts, caller, |contract| {
            query(contract.repository.store(), &ProductView::All)
        })
    }

    #[instrument(skip(self, caller))]
    fn get_products_by_manufacturer(
        &self,
        caller: &dyn IdentityResolver,
        manufacturer: &str,
    ) -> ContractResult<Vec<ProductRecord>> {
        let view = ProductView::ByManufacturer(manufacturer.to_string());
        self.read_op(ContractOperation::GetProductsByManufacturer, caller, |contract| {
            query(contract.repository.store(), &view)
        })
    }

    #[instrument(skip(self, caller))]
    fn get_consumer_ordered_product_list(
        &self,
        caller: &dyn IdentityResolver,
        user_name: &str,
    ) -> ContractResult<Vec<ProductRecord>> {
        let view = ProductView::ByConsumer(user_name.to_string());
        self.read_op(
            ContractOperation::GetConsumerOrderedProductList,
            caller,
            |contract| query(contract.repository.store(), &view),
        )
    }

    #[instrument(skip(self, caller))]
    fn get_order_requested_product_list(
        &self,
        caller: &dyn IdentityResolver,
        user_name: &str,
    ) -> ContractResult<Vec<ProductRecord>> {
        let view = ProductView::OrderRequestsFor(user_name.to_string());
        self.read_op(
            ContractOperation::GetOrderRequestedProductList,
            caller,
            |contract| query(contract.repository.store(), &view),
        )
    }

    #[instrument(skip(self, caller), fields(product_id = %id))]
    fn get_product_status(&self, caller: &dyn IdentityResolver, id: &str) -> ContractResult<String> {
        self.read_op(ContractOperation::GetProductStatus, caller, |contract| {
            Ok(contract.repository.read(id)?.status.to_string())
        })
    }

    #[instrument(skip(self, caller), fields(product_id = %id))]
    fn verify_product_authenticity(
        &self,
        caller: &dyn IdentityResolver,
        id: &str,
    ) -> ContractResult<bool> {
        self.read_op(ContractOperation::VerifyProductAuthenticity, caller, |contract| {
            Ok(contract.repository.find(id)?.is_some())
        })
    }

    #[instrument(skip(self, caller), fields(product_id = %id))]
    fn track_product_history(
        &self,
        caller: &dyn IdentityResolver,
        id: &str,
    ) -> ContractResult<Vec<ProductRecord>> {
        self.read_op(ContractOperation::TrackProductHistory, caller, |contract| {
            let entries = track_history(contract.repository.store(), id)?;
            Ok(entries.into_iter().map(|entry| entry.record).collect())
        })
    }
}

/// Contract over an empty in-memory ledger with the default configuration.
pub fn create_test_contract() -> ProductContract<sc_01_ledger_store::InMemoryLedger> {
    ProductContract {
        guard: AccessGuard::new(
            OrganizationId::from(crate::config::DEFAULT_MANUFACTURER_MSP),
            OrganizationId::from(crate::config::DEFAULT_CONSUMER_MSP),
        ),
        config: ContractConfig::default(),
        repository: ProductRepository::new(sc_01_ledger_store::InMemoryLedger::new()),
        stats: StatsCounters::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProductStatus;
    use shared_types::ClientIdentity;

    fn manufacturer() -> ClientIdentity {
        ClientIdentity::new("Org1MSP")
    }

    fn consumer() -> ClientIdentity {
        ClientIdentity::new("Org2MSP")
    }

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
    fn test_new_rejects_invalid_config() {
        let config = ContractConfig {
            consumer_msp: OrganizationId::from("Org1MSP"),
            ..ContractConfig::default()
        };
        assert!(ProductContract::new(sc_01_ledger_store::InMemoryLedger::new(), config).is_err());
    }

    #[test]
    fn test_init_ledger_seeds_and_overwrites() {
        let mut contract = create_test_contract();
        contract.init_ledger(&manufacturer()).unwrap();
        contract.init_ledger(&manufacturer()).unwrap();

        let all = contract.get_all_products(&consumer()).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|p| p.status == ProductStatus::Created));
        assert_eq!(contract.track_product_history(&consumer(), "1").unwrap().len(), 2);
    }

    #[test]
    fn test_init_ledger_is_manufacturer_only() {
        let mut contract = create_test_contract();
        assert!(matches!(
            contract.init_ledger(&consumer()),
            Err(ContractError::AuthorizationDenied { .. })
        ));
        assert!(contract.store().is_empty());
    }

    #[test]
    fn test_missing_identity_is_rejected_for_mutations() {
        let mut contract = create_test_contract();
        let err = contract
            .create_product(&ClientIdentity::anonymous(), widget())
            .unwrap_err();
        assert!(matches!(err, ContractError::Identity(_)));
        assert!(!contract.product_exists(&manufacturer(), "42").unwrap());
    }

    #[test]
    fn test_reads_tolerate_unresolved_caller() {
        let mut contract = create_test_contract();
        contract.create_product(&manufacturer(), widget()).unwrap();
        let anonymous = ClientIdentity::anonymous();
        assert_eq!(
            contract.get_product_status(&anonymous, "42").unwrap(),
            "Pending"
        );
    }

    #[test]
    fn test_accept_ignores_manufacturer_argument() {
        let mut contract = create_test_contract();
        contract.create_product(&manufacturer(), widget()).unwrap();
        contract
            .product_order(&consumer(), "42", "ConsB", "2024-01-02")
            .unwrap();
        contract
            .product_accept(&manufacturer(), "42", "SomeoneElse", "2024-01-03")
            .unwrap();
        let record = contract.read_product(&consumer(), "42").unwrap();
        assert_eq!(record.status, ProductStatus::Accepted);
        assert_eq!(record.modified_date, "2024-01-02");
    }

    #[test]
    fn test_verify_authenticity_false_when_absent() {
        let contract = create_test_contract();
        assert!(!contract.verify_product_authenticity(&consumer(), "nope").unwrap());
        assert!(matches!(
            contract.read_product(&consumer(), "nope"),
            Err(ContractError::NotFound { .. })
        ));
    }

    #[test]
    fn test_history_entries_carry_revisions() {
        let mut contract = create_test_contract();
        contract.create_product(&manufacturer(), widget()).unwrap();
        contract.product_ship(&manufacturer(), "42", "2024-01-04").unwrap();

        let entries = contract
            .track_product_history_entries(&consumer(), "42")
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].revision, 1);
        assert_eq!(entries[1].revision, 2);
        assert_eq!(entries[1].record.status, ProductStatus::Shipped);
    }

    #[test]
    fn test_stats_track_outcomes() {
        let mut contract = create_test_contract();
        contract.create_product(&manufacturer(), widget()).unwrap();
        let _ = contract.create_product(&consumer(), widget());
        let _ = contract.create_product(&manufacturer(), widget());
        let _ = contract.read_product(&consumer(), "42");

        assert_eq!(
            contract.stats(),
            ContractStats {
                invocations: 4,
                successful_mutations: 1,
                rejected_requests: 1,
                failed_requests: 1,
            }
        );
    }

    #[test]
    fn test_store_outlives_contract() {
        let mut contract = create_test_contract();
        assert_eq!(contract.config().manufacturer_msp, OrganizationId::from("Org1MSP"));
        contract.create_product(&manufacturer(), widget()).unwrap();
        contract.product_ship(&manufacturer(), "42", "2024-01-04").unwrap();

        let store = contract.into_store();
        assert_eq!(store.last_revision(), 2);

        let reopened = ProductContract::new(store, ContractConfig::default()).unwrap();
        assert_eq!(
            reopened.get_product_status(&consumer(), "42").unwrap(),
            "Shipped"
        );
    }
}
