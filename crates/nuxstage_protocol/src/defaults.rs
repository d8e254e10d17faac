//! Canonical values shared across the staging pipeline.

/// Literal token substituted with the assigned HTTP port at launch time by
/// the bundled `update_nuxeo_conf` helper. Never resolved during staging.
pub const HTTP_PORT_TOKEN: &str = "TCATPORT";

/// The server only ever binds the loopback interface; the host router
/// fronts it.
pub const LOOPBACK_ADDR: &str = "127.0.0.1";

/// Repository clustering delay in milliseconds, applied whenever an
/// external database is bound.
pub const CLUSTERING_DELAY_MS: u32 = 2000;

/// Fixed JVM permanent-generation ceiling in megabytes.
pub const MAX_PERM_SIZE_MB: u32 = 512;

/// RMI distributed-GC interval in milliseconds (client and server).
pub const RMI_GC_INTERVAL_MS: u64 = 3_600_000;

/// Directory the server archive unpacks to, relative to the droplet root.
pub const SERVER_DIR: &str = "nuxeo";

/// Bundled server archive name inside the resources directory.
pub const SERVER_ARCHIVE: &str = "nuxeo.zip";

/// Droplet descriptor shipped in the resources directory; relocated to the
/// droplet root during staging.
pub const DROPLET_DESCRIPTOR: &str = "droplet.yaml";

/// Launch-time token substitution helper shipped in the resources
/// directory.
pub const CONF_HELPER: &str = "update_nuxeo_conf";

pub const STARTUP_SCRIPT: &str = "startup";
pub const STOP_SCRIPT: &str = "stop";
pub const PID_FILE: &str = "run.pid";
pub const STAGING_MANIFEST: &str = "staging.json";

/// Both lifecycle scripts are written world-readable and executable.
pub const SCRIPT_MODE: u32 = 0o755;

/// Framework name recorded in the staging manifest.
pub const FRAMEWORK: &str = "nuxeo";
