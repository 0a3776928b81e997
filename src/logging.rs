//! Tracing subscriber setup for binaries and test harnesses.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the host's job. These helpers cover the two common hosts: plain
//! console output for local runs and tests, JSON lines for serverless log
//! aggregation.

use tracing_subscriber::EnvFilter;

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install a console subscriber honoring `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Install a console subscriber with an explicit default directive.
pub fn init_with_filter(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(false)
        .try_init();
}

/// Install a JSON-lines subscriber for log aggregation backends.
pub fn init_json() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter("info"))
        .try_init();
}
