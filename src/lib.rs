/// Declare common crate modules for linking
pub mod constants;
pub mod cputime;
pub mod error;
pub mod partition;
pub mod pi;
pub mod primes;
pub mod runner;
pub mod task;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber on stderr, leaving stdout to results.
///
/// The level comes from `RUST_LOG` and defaults to `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
