//! stderr tracing subscriber for the CLI.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins when set; otherwise
/// `--debug` selects `debug`, and the default is `warn`.
pub fn init(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(debug)
        .with_line_number(debug)
        .try_init();

    tracing::debug!(
        "Launched with command line: {}",
        std::env::args().collect::<Vec<_>>().join(" ")
    );
}
