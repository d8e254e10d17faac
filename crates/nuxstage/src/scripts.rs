//! Lifecycle script generation.
//!
//! Scripts are assembled from an ordered statement list instead of raw
//! text interpolation, so ordering and the no-blank-line contract are
//! checkable in tests. Blank lines are load-bearing downstream: the host
//! concatenates and scrapes these scripts and chokes on empty lines.

use nuxstage_protocol::defaults;
use std::collections::BTreeMap;

/// Foreground launch command, relative to the unpacked server root.
const START_COMMAND: &str = "./bin/nuxeoctl console";

/// Ordered shell statement list with blank-line suppression on render.
#[derive(Debug)]
pub struct ScriptBuilder {
    statements: Vec<String>,
}

impl ScriptBuilder {
    /// Start a new script with the shebang line.
    pub fn new() -> Self {
        ScriptBuilder {
            statements: vec!["#!/bin/bash".to_string()],
        }
    }

    /// Append one statement line.
    pub fn statement(&mut self, stmt: impl Into<String>) -> &mut Self {
        self.statements.push(stmt.into());
        self
    }

    /// Append a multi-line block, one statement per line. Empty blocks are
    /// fine; blank lines inside the block are dropped at render time.
    pub fn block(&mut self, block: &str) -> &mut Self {
        for line in block.lines() {
            self.statements.push(line.to_string());
        }
        self
    }

    /// Statement list as rendered, for order assertions.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Render to shell text: whitespace-only statements are suppressed,
    /// output is newline-terminated.
    pub fn render(&self) -> String {
        let mut out: String = self
            .statements
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        out
    }
}

/// Generate the startup script.
///
/// Statement order: env exports (sorted by key), caller-supplied pre-launch
/// block, `cd` into the server tree, background launch with log
/// redirection, pid capture, blocking wait. The wait keeps this script
/// alive as the long-lived process the host supervisor watches.
///
/// Two pids are recorded in `run.pid`: the server's, then this script's
/// parent. The stop script reaps both trees in that order.
pub fn startup_script(env: &BTreeMap<String, String>, pre_launch: &str) -> String {
    let mut script = ScriptBuilder::new();
    for (key, value) in env {
        script.statement(format!("export {}=\"{}\"", key, value));
    }
    script.block(pre_launch);
    script.statement(format!("cd {}", defaults::SERVER_DIR));
    script.statement(format!(
        "{} > ../logs/stdout.log 2> ../logs/stderr.log &",
        START_COMMAND
    ));
    script.statement("STARTED=$!");
    script.statement(format!("echo \"$STARTED\" >> ../{}", defaults::PID_FILE));
    script.statement(format!("echo \"$PPID\" >> ../{}", defaults::PID_FILE));
    script.statement("wait $STARTED");
    script.render()
}

/// Generate the stop script: a self-contained recursive process-tree
/// killer over the pids recorded in `run.pid`.
///
/// `killtree` recurses into every child before force-killing the root, so
/// no process dies before its descendants. Pids are processed in file
/// order: the server tree first, then the startup script's parent.
pub fn stop_script() -> String {
    let mut script = ScriptBuilder::new();
    script.statement("killtree() {");
    script.statement("  local _pid=$1");
    script.statement("  for _child in $(ps -o pid --no-headers --ppid ${_pid}); do");
    script.statement("    killtree ${_child}");
    script.statement("  done");
    script.statement("  kill -9 ${_pid}");
    script.statement("}");
    script.statement(format!("if [ ! -f {} ]; then", defaults::PID_FILE));
    script.statement(format!(
        "  echo \"{} not found; nothing to stop\"",
        defaults::PID_FILE
    ));
    script.statement("  exit 1");
    script.statement("fi");
    script.statement("while read -r _pid; do");
    script.statement("  killtree \"${_pid}\"");
    script.statement(format!("done < {}", defaults::PID_FILE));
    script.render()
}
