//! Tracing subscriber setup
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;

/// Level used when the configured `LOG_LEVEL` is not a valid filter.
const FALLBACK_LEVEL: &str = "info";

/// Install the global subscriber.
///
/// `RUST_LOG` directives win when present and valid, otherwise the filter is
/// `config.log_level`.
pub fn init_tracing(config: &Config) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = env_filter(rust_log.as_deref(), &config.log_level);

    fmt().with_env_filter(filter).with_target(true).init();
}

fn env_filter(rust_log: Option<&str>, log_level: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(log_level).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_LEVEL))
}
