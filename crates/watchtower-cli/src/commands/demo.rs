//! Demo command implementation

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use watchtower::prelude::*;
use watchtower::{ManualEntryPlugin, PluginConfig, RunDiff};

/// Counts gathered while the walkthrough runs
#[derive(Debug)]
pub struct DemoOutcome {
    pub evidence: usize,
    pub claims: usize,
    pub artifacts: usize,
    pub alerts: usize,
    pub diff: RunDiff,
    pub report_lineage: usize,
    pub markdown: String,
}

pub fn execute(config: WatchtowerConfig, markdown_out: Option<&Path>) -> Result<()> {
    let outcome = run(config)?;

    if let Some(path) = markdown_out {
        std::fs::write(path, &outcome.markdown)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nReport saved to {}", path.display());
    }

    println!("\nSummary");
    println!("{}", "=".repeat(60));
    println!("Total Evidence: {}", outcome.evidence);
    println!("Total Claims: {}", outcome.claims);
    println!("Total Artifacts: {}", outcome.artifacts);
    println!("Total Alerts: {}", outcome.alerts);
    println!("Run changes: {}", outcome.diff.total_changes);
    println!("Report versions: {}", outcome.report_lineage);
    Ok(())
}

fn short(hash: &str) -> &str {
    hash.get(..16).unwrap_or(hash)
}

fn record_id(id: Option<&str>) -> Result<String> {
    id.map(str::to_string)
        .context("Stored record is missing its identifier")
}

pub fn run(config: WatchtowerConfig) -> Result<DemoOutcome> {
    let wt = Watchtower::with_config(config)?;
    let tool_version = env!("CARGO_PKG_VERSION");

    println!("=== Watchtower Demo ===");

    println!("\n1. Storing evidence...");
    let documents = [
        (
            "Bank statement showing transfer of $500,000 to offshore account",
            "bank_statement",
            "2024-01-15",
        ),
        (
            "Corporate registration documents showing shell company structure",
            "corporate_filing",
            "2024-02-01",
        ),
        (
            "Email correspondence discussing 'special arrangement' with vendor",
            "email",
            "2024-03-10",
        ),
    ];
    let mut evidence = Vec::new();
    for (content, document_type, date) in documents {
        let ev = wt.evidence().store(
            NewEvidence::new(content, "manual")
                .with_metadata_entry("document_type", document_type)
                .with_metadata_entry("date", date)
                .with_tool("watchtower", tool_version),
        )?;
        println!(
            "   - Evidence {} (SHA-256 {}...)",
            record_id(ev.id())?,
            short(&ev.content_hash())
        );
        evidence.push(ev);
    }

    let ingested = wt.ingest(
        ManualEntryPlugin::NAME,
        &plugin_config(json!({
            "content": "Analyst note: vendor invoices exceed market rate by 40%",
            "metadata": {"analyst": "Jane Doe"}
        })),
    )?;
    println!(
        "   - Ingested {} item(s) via {}",
        ingested.len(),
        ManualEntryPlugin::NAME
    );

    let e1 = record_id(evidence[0].id())?;
    let e2 = record_id(evidence[1].id())?;
    let e3 = record_id(evidence[2].id())?;

    println!("\n2. Creating claims...");
    let laundering = wt.claims().store(
        NewClaim::new(
            "Company X engaged in money laundering through offshore accounts",
            0.85,
        )
        .with_supporting([e1.clone(), e2.clone()])
        .with_tool("watchtower", tool_version),
    )?;
    let kickbacks = wt.claims().store(
        NewClaim::new("Vendor received kickbacks for inflated invoices", 0.72)
            .with_supporting([e3.clone()])
            .with_tool("watchtower", tool_version),
    )?;
    for claim in [&laundering, &kickbacks] {
        println!(
            "   - Claim {} confidence {:.2} fingerprint {}...",
            record_id(claim.id())?,
            claim.confidence(),
            short(&claim.run_fingerprint())
        );
    }

    println!("\n3. Generating alerts...");
    let alerts = wt.alerts(None)?;
    for alert in &alerts {
        println!("   - {}: {}", alert.severity.as_str().to_uppercase(), alert.message);
    }

    println!("\n4. Exporting and archiving the case file...");
    let case = wt
        .snapshot_case("Investigation: Company X Financial Fraud")?
        .with_metadata_entry("case_id", "2024-001")
        .with_metadata_entry("investigator", "Jane Doe")
        .with_metadata_entry("status", "active");
    let markdown = MarkdownExporter::new().export(&case);
    let first_report = wt.archive_report(&case, None)?;
    println!("   - Markdown: {} characters", markdown.len());
    println!(
        "   - Report {} (SHA-256 {}...)",
        record_id(first_report.id())?,
        short(&first_report.content_hash())
    );

    println!("\n5. Re-scoring in a second run...");
    let before = vec![laundering.clone(), kickbacks.clone()];
    let rescored = Claim::create(
        NewClaim::new(laundering.statement(), 0.92)
            .with_supporting([e1, e2, e3])
            .with_tool("watchtower", tool_version),
        laundering.id().map(str::to_string),
        watchtower::hash::now(),
    )?;
    let after = vec![rescored, kickbacks];
    let diff = diff_claims(&before, &after);
    println!("   - Total changes: {}", diff.total_changes);
    if let Some(change) = diff.modified.first() {
        println!("   - Confidence delta: {:.2}", change.confidence_delta);
    }
    let movement = wt.alert_generator().generate(&after, Some(before.as_slice()));
    println!("   - Alerts against previous run: {}", movement.len());

    let next_case = wt.snapshot_case(case.title.clone())?;
    let second_report = wt.archive_report(&next_case, first_report.id())?;
    let lineage = wt.artifacts().lineage(&record_id(second_report.id())?)?;

    Ok(DemoOutcome {
        evidence: wt.evidence().count()?,
        claims: wt.claims().count()?,
        artifacts: wt.artifacts().count()?,
        alerts: alerts.len(),
        diff,
        report_lineage: lineage.len(),
        markdown,
    })
}

fn plugin_config(value: serde_json::Value) -> PluginConfig {
    match value {
        serde_json::Value::Object(map) => map,
        _ => PluginConfig::new(),
    }
}
