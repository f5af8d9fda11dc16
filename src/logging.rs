// src/logging.rs
// =============================================================================
// Diagnostics setup.
//
// The operator-facing output (dashboard, batch results) goes to stdout with
// println!. tracing is for diagnostics and writes to stderr so the two don't
// mix when stdout is redirected. RUST_LOG wins over --verbose.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "bulk_crawl=debug"
    } else {
        "bulk_crawl=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init: a second call (e.g. from tests) is a no-op instead of a panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
