//! Tracing initialization.
//!
//! Console-only subscriber: an env-filter driven registry with a compact
//! fmt layer. `RUST_LOG` overrides the default level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter directive applied when `RUST_LOG` does not override it.
const DEFAULT_DIRECTIVE: &str = "stockbar=info";

/// Initialize the global tracing subscriber.
///
/// Later calls are ignored, so tests may call this freely.
#[allow(clippy::expect_used)]
pub fn init() {
    let env_filter = EnvFilter::from_default_env().add_directive(
        DEFAULT_DIRECTIVE
            .parse()
            .expect("static directive 'stockbar=info' is valid"),
    );

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
