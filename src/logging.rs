//! Tracing subscriber setup

use std::sync::Once;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::error::{Result, SimError};

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
/// Output goes to stderr so JSON results on stdout stay parseable.
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| SimError::Logging(e.to_string()))?;
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let subscriber = Registry::default().with(filter).with(layer);
    tracing::subscriber::set_global_default(subscriber).map_err(|e| SimError::Logging(e.to_string()))
}

/// Idempotent variant for tests and repeated entry points
pub fn init_once(level: &str) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = init_tracing(level);
    });
}
