use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mimesniff")]
#[command(about = "Content-based MIME type detection and MIME type tools", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: search for .mimesniff.toml)
    #[arg(long, global = true, env = "MIMESNIFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of worker threads (0 = all cores)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    pub jobs: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect the content type of files
    Detect {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Only use definitions from the configuration file
        #[arg(long)]
        no_builtins: bool,

        /// Evaluate definitions sequentially
        #[arg(long)]
        no_parallel: bool,
    },

    /// Parse a MIME type string and show its parts
    Parse {
        /// MIME type string, e.g. "text/plain; charset=utf-8"
        expression: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Print the canonical form of a MIME type string
    Normalize {
        /// MIME type string
        expression: String,
    },

    /// Check whether any accepted type includes any candidate type
    Includes {
        /// Accepted types, wildcards allowed (repeatable)
        #[arg(short, long = "accept", required = true)]
        accept: Vec<String>,

        /// Candidate types
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Compare type and subtype only
        #[arg(long)]
        ignore_parameters: bool,
    },

    /// List the types considered by detection
    Known {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// List the file extension catalog
    Extensions {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_detect_with_global_flags() {
        let cli = Cli::try_parse_from(["mimesniff", "-vv", "detect", "a.bin", "b.bin", "-f", "json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Detect { files, format, .. } => {
                assert_eq!(files.len(), 2);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_includes_requires_accept() {
        assert!(Cli::try_parse_from(["mimesniff", "includes", "text/plain"]).is_err());
        let cli = Cli::try_parse_from([
            "mimesniff",
            "includes",
            "-a",
            "text/*",
            "--accept",
            "image/png",
            "text/plain",
        ])
        .unwrap();
        match cli.command {
            Commands::Includes { accept, candidates, .. } => {
                assert_eq!(accept, vec!["text/*", "image/png"]);
                assert_eq!(candidates, vec!["text/plain"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
