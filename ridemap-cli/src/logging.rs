//! Process-wide log output for the CLI.

use env_logger::{Builder, Env};

const DEFAULT_FILTER: &str = "info";

/// Install the `env_logger` backend.
///
/// `RUST_LOG` selects the filter; without it, `info` and above are shown.
/// Logs go to stderr so the JSON report on stdout stays parseable.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
