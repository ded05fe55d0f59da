//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "MIXPLAN_LOG";

/// Directives used when `MIXPLAN_LOG` is unset or unparseable.
pub const DEFAULT_DIRECTIVES: &str = "mixplan=info";

/// Build the filter `init_tracing` installs.
///
/// Reads `MIXPLAN_LOG` for per-module log levels, e.g.
/// `MIXPLAN_LOG=mixplan_engine=debug,mixplan_core=warn`.
/// Falls back to `mixplan=info` if it is not set or is invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Initialize the Mixplan tracing/logging system with [`env_filter`].
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(env_filter())
            .try_init();
    });
}
