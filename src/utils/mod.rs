pub mod paths;
pub mod persistence;

use std::{env, sync::Once};

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "budget_tracker=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Output goes to stderr. A valid, non-empty `RUST_LOG` replaces the default
/// `budget_tracker=info` directive entirely.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
        let _ = fmt()
            .with_env_filter(env_filter(directives.as_deref()))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
