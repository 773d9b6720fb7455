// src/logging.rs
// =============================================================================
// Sets up `tracing` output for the binary.
//
// Logs go to stderr so that --json output on stdout stays machine-readable.
// RUST_LOG overrides the default level, e.g.:
//   RUST_LOG=md_link_checker=debug md-link-checker dir docs
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "md_link_checker=debug,warn"
    } else {
        "md_link_checker=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
