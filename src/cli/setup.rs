//! Setup and initialization functions for CLI
//!
//! This module contains functions for initializing the runtime environment,
//! including thread pool configuration and logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `mimesniff=debug`
pub const LOG_ENV: &str = "MIMESNIFF_LOG";

/// Default filter directive for a `-v` count
pub fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr tracing subscriber.
///
/// The filter comes from `MIMESNIFF_LOG`, then `RUST_LOG`, then the
/// verbosity flag.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if installed.is_err() {
        // Already installed - this is fine, just ignore
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        // Already configured - this is fine, just ignore
        tracing::debug!(error = %e, "Thread pool already configured");
    }
}

/// Get the number of worker threads to use
pub fn get_worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    } else {
        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(0), "warn");
        assert_eq!(default_log_level(1), "info");
        assert_eq!(default_log_level(5), "debug");
    }

    #[test]
    fn test_get_worker_count() {
        assert_eq!(get_worker_count(3), 3);
        assert!(get_worker_count(0) >= 1);
    }
}
