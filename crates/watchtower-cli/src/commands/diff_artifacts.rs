//! Diff-artifacts command implementation

use anyhow::{Context, Result};
use std::path::Path;
use watchtower::{diff_artifacts, Artifact, ArtifactDiff};

pub fn execute(a: &Path, b: &Path) -> Result<()> {
    let diff = run(a, b)?;
    if diff.is_identical() {
        tracing::info!("Artifacts are identical");
    }
    super::print_json(&diff)
}

pub fn run(a: &Path, b: &Path) -> Result<ArtifactDiff> {
    let a = load_artifact(a)?;
    let b = load_artifact(b)?;
    Ok(diff_artifacts(&a, &b))
}

fn load_artifact(path: &Path) -> Result<Artifact> {
    let raw = super::read(path)?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} does not hold an artifact", path.display()))
}
