//! `tracing` setup for the `aoc` binary.
//!
//! Log events describe what the harness is doing (stage changes, execution
//! context release, tags that are skipped) and are filtered by `RUST_LOG`.
//! Answers and run reports are plain writes done by [`crate::pipeline`] and
//! appear whatever the filter says.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Install a compact stderr subscriber.
///
/// ```bash
/// RUST_LOG=harness=debug cargo run --bin aoc -- 5
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
