//! CLI module for mimesniff
//!
//! This module provides the command-line interface, including:
//! - Argument parsing (`args`)
//! - Command handlers (`commands`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod commands;
pub mod setup;

// Re-export commonly used types for convenience
pub use args::{Cli, Commands, OutputFormat};
pub use commands::{
    handle_detect_command, handle_extensions_command, handle_includes_command,
    handle_known_command, handle_normalize_command, handle_parse_command, load_effective_config,
    DetectOptions,
};
pub use setup::{configure_thread_pool, get_worker_count, init_logging};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
