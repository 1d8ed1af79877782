use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Initialize tracing on stderr.
///
/// The filter comes from `ARGSIFT_LOG`, then `RUST_LOG`, and defaults to
/// `warn` so skipped response files are reported. Calling this more than once
/// is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("ARGSIFT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .with_level(true)
        .try_init();
}
