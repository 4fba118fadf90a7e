//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! pretty or a JSON `fmt` layer. Every line carries the standard fields
//! emitted by the contract (`operation`, `product_id`, `caller_org`).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Handle returned once logging is installed.
#[derive(Debug)]
pub struct LoggingHandle {
    service_name: String,
}

impl LoggingHandle {
    /// Service name the subscriber was installed for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

/// Install the global subscriber.
///
/// Fails with `TelemetryError::LoggerInit` if a global subscriber is already
/// set or the filter directive does not parse.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingHandle, TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {}: {}", config.log_level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match (config.console_output, config.json_logs) {
        (false, _) => registry.try_init(),
        (true, true) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        (true, false) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .try_init(),
    };
    installed.map_err(|e| TelemetryError::LoggerInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "structured logging initialized"
    );

    Ok(LoggingHandle {
        service_name: config.service_name.clone(),
    })
}

/// Log a product lifecycle event with the standard fields.
#[macro_export]
macro_rules! log_product_event {
    ($level:ident, $operation:expr, $msg:literal, $product_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            operation = %$operation,
            product_id = %$product_id,
            $($($field)*,)?
            $msg
        )
    };
}
