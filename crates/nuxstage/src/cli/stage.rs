//! `stage` command: run one full staging attempt.

use crate::cli::error::HelpfulError;
use anyhow::bail;
use clap::Args;
use nuxstage::stager::{self, StageOptions};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct StageArgs {
    /// Droplet directory to stage into
    #[arg(long)]
    pub dest: PathBuf,

    /// Application memory allocation in megabytes
    #[arg(long)]
    pub memory: u32,

    /// Bundle directory containing nuxeo.zip, droplet.yaml and the conf helper
    #[arg(long)]
    pub resources: PathBuf,

    /// Application source tree (plugin bundles) copied into the server
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Bound services document (JSON array); falls back to $VCAP_SERVICES
    #[arg(long)]
    pub services: Option<PathBuf>,

    /// Environment variable exported by the startup script (KEY=VALUE, repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,
}

pub fn run(args: StageArgs) -> anyhow::Result<()> {
    if !args.resources.is_dir() {
        return Err(HelpfulError::path_not_found(&args.resources)
            .with_context("The resources bundle directory is required for staging")
            .into());
    }
    if let Some(source) = &args.source {
        if !source.is_dir() {
            return Err(HelpfulError::path_not_found(source)
                .with_context("The application source directory does not exist")
                .into());
        }
    }

    let bindings = crate::cli::load_bindings(args.services.as_deref())?;
    let env = parse_env_pairs(&args.env)?;

    let opts = StageOptions {
        dest: args.dest,
        memory_mb: args.memory,
        resources: args.resources,
        source: args.source,
        bindings,
        env,
    };

    let summary = stager::stage_application(&opts)?;
    println!(
        "Staged {} ({} template, {} MB) into {}",
        summary.framework,
        summary.template,
        summary.memory_mb,
        opts.dest.display()
    );
    Ok(())
}

fn parse_env_pairs(pairs: &[String]) -> anyhow::Result<BTreeMap<String, String>> {
    let mut env = BTreeMap::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                env.insert(key.to_string(), value.to_string());
            }
            _ => bail!("Invalid --env entry '{}'. Expected KEY=VALUE", pair),
        }
    }
    Ok(env)
}
