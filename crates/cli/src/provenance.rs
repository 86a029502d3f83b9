//! Provenance sidecars: every written honeycomb gets `<stem>.provenance.json`
//! recording how to reproduce it.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Subcommand and parameters that produced an artifact.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self { command, params }
    }

    fn document(&self, artifact: &Path, code_rev: &str) -> Value {
        json!({
            "code_rev": code_rev,
            "honeycomb_version": honeycomb::VERSION,
            "command": self.command,
            "params": self.params,
            "outputs": [artifact.to_string_lossy()],
        })
    }
}

/// Write the sidecar next to `artifact` and return its path.
pub fn write_sidecar(artifact: &Path, payload: &Payload) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    let doc = payload.document(artifact, &current_git_rev());
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `dir/cubic.json` → `dir/cubic.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "honeycomb".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    from_env
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
