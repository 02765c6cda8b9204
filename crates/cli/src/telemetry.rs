//! Tracing/logging initialization for the binary.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process.
///
/// Defaults to `warn` so log lines do not interleave with the interactive
/// prompts; raise via `RUST_LOG` when debugging. Safe to call more than
/// once (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
}
