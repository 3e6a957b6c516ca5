use tracing_subscriber::{fmt, EnvFilter};

/// Installs the stderr subscriber once; later calls are no-ops so tests and
/// binaries can both call this unconditionally.
pub fn init_logging(default_directives: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
