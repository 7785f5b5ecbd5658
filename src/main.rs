use anyhow::Result;
use mimesniff::cli::{self, Cli, Commands};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = cli::parse_args();

    cli::init_logging(cli.verbose);
    cli::configure_thread_pool(cli.jobs);
    tracing::debug!(workers = cli::get_worker_count(cli.jobs), "Thread pool ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let success = run(cli, &mut out)?;
    out.flush()?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<bool> {
    match cli.command {
        Commands::Detect {
            files,
            format,
            no_builtins,
            no_parallel,
        } => {
            let config = cli::load_effective_config(cli.config.as_deref())?;
            let options = cli::DetectOptions {
                files,
                format,
                no_builtins,
                no_parallel,
            };
            cli::handle_detect_command(config, options, out)
        }
        Commands::Parse { expression, format } => {
            cli::handle_parse_command(&expression, format, out)
        }
        Commands::Normalize { expression } => cli::handle_normalize_command(&expression, out),
        Commands::Includes {
            accept,
            candidates,
            ignore_parameters,
        } => cli::handle_includes_command(&accept, &candidates, ignore_parameters, out),
        Commands::Known { format } => {
            let config = cli::load_effective_config(cli.config.as_deref())?;
            cli::handle_known_command(&config, format, out)
        }
        Commands::Extensions { format } => cli::handle_extensions_command(format, out),
    }
}
