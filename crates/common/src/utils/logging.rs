use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Runtime environment name that switches logging to JSON output.
pub const PRODUCTION_ENV: &str = "production";

/// Initialize tracing subscriber with human readable output on stdout.
/// - Respects `RUST_LOG` if set
/// - Falls back to `debug` for our crates and `info` for the HTTP/gRPC stack
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,server=debug,catalog=debug,service=debug,tower_http=info,h2=warn")
    });
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, defaults to `info`
/// - Writes to stdout for container log collection
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,h2=warn"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the subscriber flavour from the runtime environment name.
pub fn init_logging_for_env(env: &str) {
    if env.eq_ignore_ascii_case(PRODUCTION_ENV) {
        init_logging_json();
    } else {
        init_logging_default();
    }
}
