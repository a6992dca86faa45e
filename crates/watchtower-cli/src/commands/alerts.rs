//! Alerts command implementation

use anyhow::Result;
use std::path::Path;
use watchtower::{AlertGenerator, AlertSummary, WatchtowerConfig};

pub fn execute(config: &WatchtowerConfig, current: &Path, previous: Option<&Path>) -> Result<()> {
    let summary = run(config, current, previous)?;
    tracing::info!(total = summary.total_alerts, "Generated alerts");
    super::print_json(&summary)
}

pub fn run(
    config: &WatchtowerConfig,
    current: &Path,
    previous: Option<&Path>,
) -> Result<AlertSummary> {
    let current = super::load_claims(current)?;
    let previous = previous.map(super::load_claims).transpose()?;

    let generator = AlertGenerator::new(config.alerts.clone());
    let alerts = generator.generate(&current, previous.as_deref());
    Ok(generator.summarize(&alerts))
}
