//! `resolve` command: print the database configuration staging would use.

use clap::Args;
use nuxstage::database;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Bound services document (JSON array); falls back to $VCAP_SERVICES
    #[arg(long)]
    pub services: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ResolveArgs) -> anyhow::Result<()> {
    let bindings = crate::cli::load_bindings(args.services.as_deref())?;
    let config = database::database_config(&bindings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("template: {}", config.template);
    println!("host:     {}", config.host);
    println!("port:     {}", config.port);
    println!("username: {}", config.username);
    println!("database: {}", config.database);
    Ok(())
}
