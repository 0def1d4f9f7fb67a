//! Logging initialization.
//!
//! Library crates log through the `log` facade; the subscriber installed here
//! picks those records up through its `tracing-log` bridge.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the verbosity flags (`EnvFilter` syntax).
pub const LOG_ENV: &str = "MDXBLOG_LOG";

/// Maps a verbosity level to a tracing directive string.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"` (saturates)
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes the global subscriber, writing to stderr.
///
/// `MDXBLOG_LOG`, when set, takes precedence over `verbosity`. Calling this
/// more than once is harmless.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}
