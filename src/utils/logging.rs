//! Diagnostic logging to stderr. Operator-facing output stays on stdout via `println!`.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or
/// everything from this crate at debug level when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,seedkit=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
