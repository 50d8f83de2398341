use tracing_subscriber::EnvFilter;

/// Route diagnostics to stderr so stdout stays clean for JSON.
///
/// `RUST_LOG` picks the filter unless `debug` is set, which forces `debug`.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
