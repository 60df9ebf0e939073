//! Observability utilities.

use crate::types::ObservabilityConfig;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Initialize tracing subscriber once for the process.
///
/// `RUST_LOG` takes precedence over the configured level. Output is compact
/// text unless `json_logs` is set or `MCP_BRIDGE_LOG_FORMAT=json`. Logs go to
/// stderr so stdout stays free for protocol traffic.
pub fn init_tracing(config: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        let json = config.json_logs
            || std::env::var("MCP_BRIDGE_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false);

        let result = if json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init()
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::init_tracing;
    use crate::types::ObservabilityConfig;

    #[test]
    fn init_tracing_is_idempotent() {
        let config = ObservabilityConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }
}
