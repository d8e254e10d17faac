//! `nuxeo.conf` rendering.
//!
//! Output is line-oriented `key=value` text, written once at staging time
//! and never re-read by us. Two-phase configuration: the `TCATPORT` token
//! stays literal here and is substituted by the bundled
//! `update_nuxeo_conf` helper when the startup script learns the assigned
//! port. Credential values are emitted verbatim; the broker contract
//! guarantees they do not contain characters that break the format.

use nuxstage_protocol::{defaults, DatabaseTemplate, StagingConfig};

/// Render the complete configuration file. Newline-terminated, never
/// contains a blank line.
pub fn render(config: &StagingConfig) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mem = config.jvm_mem;

    lines.push(format!(
        "JAVA_OPTS=-Xms{mem}m -Xmx{mem}m -XX:MaxPermSize={perm}m \
         -Dsun.rmi.dgc.client.gcInterval={rmi} -Dsun.rmi.dgc.server.gcInterval={rmi} \
         -Dfile.encoding=UTF-8",
        mem = mem,
        perm = defaults::MAX_PERM_SIZE_MB,
        rmi = defaults::RMI_GC_INTERVAL_MS,
    ));
    lines.push("# Enable gc log".to_string());
    lines.push(
        "JAVA_OPTS=$JAVA_OPTS -Xloggc:${nuxeo.log.dir}/gc.log -verbose:gc \
         -XX:+PrintGCDetails -XX:+PrintGCTimeStamps"
            .to_string(),
    );
    lines.push("nuxeo.force.generation=true".to_string());
    lines.push("nuxeo.wizard.done=true".to_string());
    lines.push("launcher.override.java.tmpdir=false".to_string());
    lines.push("# disable ajp and admin port".to_string());
    lines.push("nuxeo.server.ajp.port=-1".to_string());
    lines.push("nuxeo.server.tomcat-admin.port=-1".to_string());
    lines.push(format!("nuxeo.bind.address={}", defaults::LOOPBACK_ADDR));
    lines.push(format!(
        "nuxeo.server.http.port={}",
        defaults::HTTP_PORT_TOKEN
    ));
    lines.push(format!(
        "nuxeo.loopback.url=http://{}:{}/nuxeo",
        defaults::LOOPBACK_ADDR,
        defaults::HTTP_PORT_TOKEN
    ));

    match config.database.template {
        DatabaseTemplate::Postgresql => {
            let db = &config.database;
            lines.push("nuxeo.templates=postgresql".to_string());
            lines.push(format!("nuxeo.db.name={}", db.database));
            lines.push(format!("nuxeo.db.user={}", db.username));
            lines.push(format!("nuxeo.db.password={}", db.password));
            lines.push(format!("nuxeo.db.host={}", db.host));
            lines.push(format!("nuxeo.db.port={}", db.port));
            lines.push("# activate cluster mode, binaries are not persisted at the moment".to_string());
            lines.push("repository.clustering.enabled=true".to_string());
            lines.push(format!(
                "repository.clustering.delay={}",
                defaults::CLUSTERING_DELAY_MS
            ));
            lines.push("repository.binary.store=${nuxeo.data.dir}/binaries".to_string());
        }
        DatabaseTemplate::Default => {
            lines.push("nuxeo.templates=default".to_string());
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
