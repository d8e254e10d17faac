//! Nuxstage launcher
//!
//! Stages the bundled Nuxeo server into an application droplet: resolves
//! the bound database service, renders `nuxeo.conf`, unpacks the server
//! archive and emits the startup/stop script pair.

use clap::{Parser, Subcommand};
use nuxstage::StagingError;
use nuxstage_logging::LogConfig;
use std::process::ExitCode;
use tracing::error;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "nuxstage",
    about = "Stage the bundled Nuxeo server into an application droplet"
)]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one full staging attempt
    Stage(cli::stage::StageArgs),
    /// Resolve the database binding and print the resulting configuration
    Resolve(cli::resolve::ResolveArgs),
    /// Render nuxeo.conf to stdout without staging
    Render(cli::render::RenderArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match nuxstage_logging::init_logging(LogConfig {
        app_name: "nuxstage",
        verbose: cli.verbose,
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    let result = match cli.command {
        Commands::Stage(args) => cli::stage::run(args),
        Commands::Resolve(args) => cli::resolve::run(args),
        Commands::Render(args) => cli::render::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Staging failed: {:#}", err);
            eprintln!("Error: {:#}", err);
            exit_code_for(&err)
        }
    }
}

/// A recognized binding without credentials is the broker's fault, not
/// ours; the host distinguishes that contract violation by exit status 1.
/// Everything else fails with the generic status.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<StagingError>() {
        Some(StagingError::MissingCredentials(_)) => ExitCode::from(1),
        _ => ExitCode::from(2),
    }
}
