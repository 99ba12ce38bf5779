use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use repotree::cli::{Cli, Command};
use repotree::commands;
use repotree::config::{DEFAULT_LOG_DIRECTIVE, FAULT_LOG_FILE};
use repotree::fault;
use repotree::fs::RealFileSystem;
use repotree::remote::{RemoteTreeFetcher, ReqwestTransport};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
        )
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("repotree: cannot determine working directory: {err}");
            return ExitCode::from(1);
        }
    };

    if let Err(err) = fault::install(cwd.join(FAULT_LOG_FILE)) {
        warn!(%err, "fault recorder not installed");
    }

    let result = match &cli.command {
        Command::Manifest(args) => commands::run_manifest(&RealFileSystem, args, &cwd).await,
        Command::Explore(args) => {
            let fetcher =
                RemoteTreeFetcher::with_api_base(ReqwestTransport::new(), &args.api_base);
            let mut stdout = std::io::stdout().lock();
            commands::run_explore(&fetcher, args, &mut stdout).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("repotree: {err:#}");
            ExitCode::from(1)
        }
    }
}
