//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use ledgerlens_core::config::ObservabilityConfig;
use ledgerlens_core::constants::LOG_ENV_VAR;
use tracing_subscriber::EnvFilter;

/// Returned when a global subscriber is already installed.
pub type TracingInitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Initialize the global subscriber.
///
/// `LEDGERLENS_LOG` wins when set and parsable; otherwise the configured
/// `log_level` is used. Output is JSON when `json_logs` is set.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), TracingInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    install(filter, config.json_logs)
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str, json: bool) -> Result<(), TracingInitError> {
    install(EnvFilter::new(filter), json)
}

fn install(filter: EnvFilter, json: bool) -> Result<(), TracingInitError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    }
}
