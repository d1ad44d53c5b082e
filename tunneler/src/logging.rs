//! Diagnostic tracing for mining runs.
//!
//! Tracing output goes to stderr. It is not part of the product output;
//! `tunneler dig` reports its outcome on stdout.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default level for a count of `-v` flags: warn, then info, then debug.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` directives win over the `-v` level; unparsable ones are skipped.
///
/// # Example
/// ```bash
/// RUST_LOG=tunneler::movement=trace tunneler -v dig --world cave.toml
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity > 1)
                .compact(),
        )
        .init();
}
