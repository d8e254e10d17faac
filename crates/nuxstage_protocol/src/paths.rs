//! Layout of the staged droplet tree.
//!
//! Everything staging writes lives under one destination root:
//!
//! ```text
//! <dest>/
//!   startup            launch script (0755)
//!   stop               tree-kill script (0755)
//!   run.pid            written by startup at run time
//!   droplet.yaml       relocated from resources/
//!   staging.json       staging manifest
//!   logs/              stdout/stderr capture
//!   resources/         conf helper (archive copy removed after unpack)
//!   nuxeo/             unpacked server
//!     bin/nuxeo.conf
//!     nxserver/plugins/
//! ```

use crate::defaults;
use std::path::{Path, PathBuf};

/// Unpacked server root: `<dest>/nuxeo`
pub fn server_dir(dest: &Path) -> PathBuf {
    dest.join(defaults::SERVER_DIR)
}

/// Rendered configuration file: `<dest>/nuxeo/bin/nuxeo.conf`
pub fn conf_path(dest: &Path) -> PathBuf {
    server_dir(dest).join("bin").join("nuxeo.conf")
}

/// Plugin drop-in directory: `<dest>/nuxeo/nxserver/plugins`
pub fn plugins_dir(dest: &Path) -> PathBuf {
    server_dir(dest).join("nxserver").join("plugins")
}

/// Log capture directory: `<dest>/logs`
pub fn logs_dir(dest: &Path) -> PathBuf {
    dest.join("logs")
}

/// Staged resources directory: `<dest>/resources`
pub fn resources_dir(dest: &Path) -> PathBuf {
    dest.join("resources")
}

pub fn startup_path(dest: &Path) -> PathBuf {
    dest.join(defaults::STARTUP_SCRIPT)
}

pub fn stop_path(dest: &Path) -> PathBuf {
    dest.join(defaults::STOP_SCRIPT)
}

pub fn manifest_path(dest: &Path) -> PathBuf {
    dest.join(defaults::STAGING_MANIFEST)
}
