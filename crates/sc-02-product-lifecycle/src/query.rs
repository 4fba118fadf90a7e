//! # Query Engine
//!
//! Derived views over the whole world state. Each view is a full ascending
//! scan filtered in memory; results keep key order. An empty result is not
//! an error.

use sc_01_ledger_store::{KeyRange, LedgerStore};

use crate::domain::codec::decode_record;
use crate::domain::entities::{ProductRecord, ProductStatus};
use crate::errors::{ContractError, ContractResult};

/// A filtered view of all products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductView {
    /// Every record.
    All,
    /// Records created by this manufacturer.
    ByManufacturer(String),
    /// Records ordered by this consumer.
    ByConsumer(String),
    /// Records awaiting acceptance by this manufacturer.
    OrderRequestsFor(String),
}

impl ProductView {
    /// True if `record` belongs to the view.
    pub fn matches(&self, record: &ProductRecord) -> bool {
        match self {
            ProductView::All => true,
            ProductView::ByManufacturer(manufacturer) => record.manufacturer == *manufacturer,
            ProductView::ByConsumer(consumer) => record.consumer == *consumer,
            ProductView::OrderRequestsFor(manufacturer) => {
                record.status == ProductStatus::PendingOrderRequest
                    && record.manufacturer == *manufacturer
            }
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            ProductView::All => "all",
            ProductView::ByManufacturer(_) => "by_manufacturer",
            ProductView::ByConsumer(_) => "by_consumer",
            ProductView::OrderRequestsFor(_) => "order_requests",
        }
    }
}

/// Lazily decode and filter the records of `view`.
///
/// The scan cursor lives as long as the returned iterator.
pub fn scan_view<'a, S: LedgerStore>(
    store: &'a S,
    view: &'a ProductView,
) -> ContractResult<impl Iterator<Item = ContractResult<ProductRecord>> + 'a> {
    let cursor = store.scan_range(&KeyRange::full())?;
    Ok(cursor.filter_map(move |entry| {
        let decoded = entry
            .map_err(ContractError::from)
            .and_then(|(key, bytes)| {
                decode_record(&bytes).map_err(|e| ContractError::decode(key, e))
            });
        match decoded {
            Ok(record) if view.matches(&record) => Some(Ok(record)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        }
    }))
}

/// Collect the records of `view`, failing on the first store or decode error.
pub fn query<S: LedgerStore>(store: &S, view: &ProductView) -> ContractResult<Vec<ProductRecord>> {
    let records = scan_view(store, view)?.collect::<ContractResult<Vec<_>>>()?;
    supply_telemetry::QUERY_RECORDS_RETURNED
        .with_label_values(&[view.label()])
        .inc_by(records.len() as f64);
    tracing::debug!(view = view.label(), returned = records.len(), "query complete");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codec::encode_record;
    use crate::domain::entities::NewProduct;
    use sc_01_ledger_store::InMemoryLedger;

    fn put(store: &mut InMemoryLedger, id: &str, manufacturer: &str, consumer: &str, status: ProductStatus) {
        let mut record = ProductRecord::pending(NewProduct {
            id: id.to_string(),
            name: format!("product {}", id),
            description: String::new(),
            price: "1".to_string(),
            manufacturer: manufacturer.to_string(),
            created_date: "2024-01-01".to_string(),
        });
        record.consumer = consumer.to_string();
        record.status = status;
        store.put(id, &encode_record(&record).unwrap()).unwrap();
    }

    fn fixture() -> InMemoryLedger {
        let mut store = InMemoryLedger::new();
        put(&mut store, "3", "ManuA", "ConsB", ProductStatus::PendingOrderRequest);
        put(&mut store, "1", "ManuA", "null", ProductStatus::Pending);
        put(&mut store, "2", "ManuZ", "ConsB", ProductStatus::PendingOrderRequest);
        put(&mut store, "4", "ManuA", "ConsC", ProductStatus::Accepted);
        store
    }

    fn ids(records: &[ProductRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_all_in_key_order() {
        let store = fixture();
        assert_eq!(ids(&query(&store, &ProductView::All).unwrap()), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_by_manufacturer() {
        let store = fixture();
        let view = ProductView::ByManufacturer("ManuA".to_string());
        assert_eq!(ids(&query(&store, &view).unwrap()), ["1", "3", "4"]);
    }

    #[test]
    fn test_by_consumer() {
        let store = fixture();
        let view = ProductView::ByConsumer("ConsB".to_string());
        assert_eq!(ids(&query(&store, &view).unwrap()), ["2", "3"]);
    }

    #[test]
    fn test_order_requests() {
        let store = fixture();
        let view = ProductView::OrderRequestsFor("ManuA".to_string());
        assert_eq!(ids(&query(&store, &view).unwrap()), ["3"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let store = fixture();
        let view = ProductView::ByManufacturer("Nobody".to_string());
        assert!(query(&store, &view).unwrap().is_empty());
        assert!(query(&InMemoryLedger::new(), &ProductView::All).unwrap().is_empty());
    }

    #[test]
    fn test_decode_failure_releases_cursor() {
        let mut store = fixture();
        store.put("25", b"{broken").unwrap();
        let err = query(&store, &ProductView::All).unwrap_err();
        assert!(matches!(err, ContractError::Decode { ref id, .. } if id == "25"));
        assert_eq!(store.open_cursors(), 0);
    }

    #[test]
    fn test_lazy_scan_holds_cursor() {
        let store = fixture();
        let view = ProductView::All;
        let mut records = scan_view(&store, &view).unwrap();
        assert_eq!(records.next().unwrap().unwrap().id, "1");
        assert_eq!(store.open_cursors(), 1);
        drop(records);
        assert_eq!(store.open_cursors(), 0);
    }
}
