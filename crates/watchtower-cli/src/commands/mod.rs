pub mod alerts;
pub mod demo;
pub mod diff_artifacts;
pub mod diff_runs;
pub mod verify;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use watchtower::prelude::Serialize;
use watchtower::{Claim, JsonExporter};

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Claims from a JSON case file or a bare JSON array of claims
pub fn load_claims(path: &Path) -> Result<Vec<Claim>> {
    let raw = read(path)?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    if value.is_array() {
        return serde_json::from_value(value)
            .with_context(|| format!("{} does not hold a claim array", path.display()));
    }

    let parsed = JsonExporter::new()
        .parse(&raw)
        .with_context(|| format!("{} is not a case file", path.display()))?;
    Ok(parsed.case.claims)
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
