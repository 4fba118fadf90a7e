//! Prometheus metrics for the supply-chain ledger.
//!
//! All metrics follow the naming convention: `sc_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CONTRACT METRICS (Subsystem 2)
    // =========================================================================

    /// Contract invocations by operation and outcome
    pub static ref CONTRACT_INVOCATIONS: CounterVec = CounterVec::new(
        Opts::new("sc_contract_invocations_total", "Contract invocations"),
        &["operation", "outcome"]  // outcome: ok/denied/failed
    ).expect("metric creation failed");

    /// Contract errors by operation and error kind
    pub static ref CONTRACT_ERRORS: CounterVec = CounterVec::new(
        Opts::new("sc_contract_errors_total", "Contract errors by operation and kind"),
        &["operation", "kind"]
    ).expect("metric creation failed");

    /// Records returned by query views
    pub static ref QUERY_RECORDS_RETURNED: CounterVec = CounterVec::new(
        Opts::new("sc_query_records_returned_total", "Records returned by query views"),
        &["view"]
    ).expect("metric creation failed");

    // =========================================================================
    // LEDGER METRICS (Subsystem 1)
    // =========================================================================

    /// Product records written to the ledger
    pub static ref LEDGER_WRITES: Counter = Counter::new(
        "sc_ledger_writes_total",
        "Product records written to the ledger"
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
#[derive(Debug)]
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CONTRACT_INVOCATIONS.clone()),
        Box::new(CONTRACT_ERRORS.clone()),
        Box::new(QUERY_RECORDS_RETURNED.clone()),
        Box::new(LEDGER_WRITES.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
