//! Diagnostics for debugging a build.
//!
//! Status lines and the compiler output are printed on stdout by `main`.
//! This module only covers the traces enabled with `RUST_LOG`, written on stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the tracing subscriber.
///
/// Reads `RUST_LOG`, defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=go_wasm_build=debug go-wasm-build
/// ```
pub fn init(ansi: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .compact(),
        )
        .init();
}
