//! `render` command: print `nuxeo.conf` to stdout without staging.

use clap::Args;
use nuxstage::{conf, database};
use nuxstage_protocol::StagingConfig;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Application memory allocation in megabytes
    #[arg(long)]
    pub memory: u32,

    /// Bound services document (JSON array); falls back to $VCAP_SERVICES
    #[arg(long)]
    pub services: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let bindings = crate::cli::load_bindings(args.services.as_deref())?;
    let database = database::database_config(&bindings)?;
    let staging = StagingConfig {
        jvm_mem: args.memory,
        database,
    };
    print!("{}", conf::render(&staging));
    Ok(())
}
