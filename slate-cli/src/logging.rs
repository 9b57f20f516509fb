use tracing_subscriber::{fmt, EnvFilter};

/// Logs go to stderr so stdout stays parseable with `--json`.
///
/// `RUST_LOG` wins over everything; otherwise `--verbose` means debug and
/// the config's level applies.
pub fn init_logging(verbose: bool, configured_level: &str) {
    let level = if verbose { "debug" } else { configured_level };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("slate={level},slate_core={level}")));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}
