//! Tracing subscriber setup.

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Mode;

/// Install the global subscriber: human-readable output in development,
/// JSON lines in production. `RUST_LOG` overrides the default `info` filter.
pub fn init(mode: Mode) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter);

    let result = match mode {
        Mode::Production => builder.json().try_init(),
        Mode::Development => builder.try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
