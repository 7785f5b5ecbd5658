//! Parallelism configuration for definition evaluation.

use serde::{Deserialize, Serialize};

/// Default value for parallel evaluation enabled
fn default_enabled() -> bool {
    true
}

/// Configuration for parallel definition evaluation.
///
/// When enabled, every definition is evaluated as its own task on rayon's
/// thread pool. Results are always reported in registration order.
///
/// # Example
///
/// ```rust
/// use mimesniff::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     max_concurrency: Some(4),
/// };
/// assert_eq!(config.effective_concurrency(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Enable parallel evaluation (default: true)
    ///
    /// When disabled, definitions are evaluated one after another on the
    /// calling thread. Useful for debugging.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum worker threads for detection (default: global rayon pool)
    ///
    /// When set, the engine gets a dedicated pool of this size.
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
        }
    }
}

impl ParallelConfig {
    /// Create a config with parallel evaluation disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Get the effective concurrency level.
    ///
    /// Returns the configured max_concurrency, or the number of
    /// available CPU cores if not specified.
    pub fn effective_concurrency(&self) -> usize {
        if !self.enabled {
            return 1;
        }
        self.max_concurrency.unwrap_or_else(num_cpus)
    }
}

/// Returns the number of available CPU cores.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}
