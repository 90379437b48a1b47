//! Structured logging to stderr.
//!
//! stdout carries protocol messages when serving over stdio, so log output
//! must never be written there.

use tracing_subscriber::EnvFilter;

/// Default filter while serving MCP clients.
pub const SERVER_FILTER: &str = "spendlog=info";
/// Default filter for one-shot CLI commands, whose output is the text itself.
pub const COMMAND_FILTER: &str = "spendlog=warn";
/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "spendlog=debug";

/// Install the global subscriber. `RUST_LOG` takes precedence over `fallback`.
pub fn init(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second call leaves the first subscriber in place.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
