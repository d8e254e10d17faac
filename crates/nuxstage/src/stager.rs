//! Staging driver: one synchronous staging attempt, end to end.
//!
//! Ordering matters: the log directory must exist before the startup
//! script can redirect into it, and the server tree must be unpacked
//! before the configuration file can land inside it. Any failure aborts
//! the whole attempt; nothing here is resumable.

use crate::error::Result;
use crate::{archive, conf, database, scripts};
use nuxstage_protocol::{defaults, paths, DatabaseTemplate, ServiceBinding, StagingConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Inputs supplied by the host staging framework.
#[derive(Debug, Clone)]
pub struct StageOptions {
    /// Droplet root everything is written into.
    pub dest: PathBuf,
    /// Memory allocation granted to the application, in megabytes.
    pub memory_mb: u32,
    /// Bundle directory holding the server archive, droplet descriptor
    /// and conf helper.
    pub resources: PathBuf,
    /// Application source tree (plugin bundles) to drop into the server.
    pub source: Option<PathBuf>,
    /// Backing services bound to the application.
    pub bindings: Vec<ServiceBinding>,
    /// Environment exported by the startup script.
    pub env: BTreeMap<String, String>,
}

/// Manifest written next to the staged application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingSummary {
    pub framework: String,
    pub staged_at: String,
    pub memory_mb: u32,
    pub template: DatabaseTemplate,
}

/// Stage the application into `opts.dest`.
pub fn stage_application(opts: &StageOptions) -> Result<StagingSummary> {
    info!("Staging into {}", opts.dest.display());

    fs::create_dir_all(paths::logs_dir(&opts.dest))?;

    let plugins = archive::prepare(&opts.dest, &opts.resources)?;
    if let Some(source) = &opts.source {
        info!("Copying application plugins from {}", source.display());
        archive::copy_tree(source, &plugins)?;
    }

    let database = database::database_config(&opts.bindings)?;
    let staging = StagingConfig {
        jvm_mem: opts.memory_mb,
        database,
    };
    write_conf(&opts.dest, &staging)?;

    write_executable(
        &paths::startup_path(&opts.dest),
        &scripts::startup_script(&opts.env, &pre_launch_block()),
    )?;
    write_executable(&paths::stop_path(&opts.dest), &scripts::stop_script())?;

    let summary = StagingSummary {
        framework: defaults::FRAMEWORK.to_string(),
        staged_at: chrono::Utc::now().to_rfc3339(),
        memory_mb: opts.memory_mb,
        template: staging.database.template,
    };
    fs::write(
        paths::manifest_path(&opts.dest),
        serde_json::to_string_pretty(&summary)?,
    )?;

    info!(
        "Staged {} ({} template, {} MB)",
        summary.framework,
        summary.template,
        summary.memory_mb
    );
    Ok(summary)
}

fn write_conf(dest: &Path, staging: &StagingConfig) -> Result<()> {
    let conf_path = paths::conf_path(dest);
    if let Some(parent) = conf_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&conf_path, conf::render(staging))?;
    info!("Wrote {}", conf_path.display());
    Ok(())
}

fn write_executable(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(defaults::SCRIPT_MODE))?;
    }
    Ok(())
}

/// Run-time preamble embedded between the env exports and the launch
/// command. The port only becomes known when the host invokes `startup`,
/// so validation and token substitution are deferred into the script.
fn pre_launch_block() -> String {
    [
        "env > env.log".to_string(),
        "PORT=-1".to_string(),
        "while getopts \":p:\" opt; do".to_string(),
        "  case $opt in".to_string(),
        "    p)".to_string(),
        "      PORT=$OPTARG".to_string(),
        "      ;;".to_string(),
        "  esac".to_string(),
        "done".to_string(),
        "if [ $PORT -lt 0 ] ; then".to_string(),
        "  echo \"Missing or invalid port (-p)\"".to_string(),
        "  exit 1".to_string(),
        "fi".to_string(),
        format!("resources/{} $PORT", defaults::CONF_HELPER),
    ]
    .join("\n")
}
