//! Verify command implementation

use anyhow::{Context, Result};
use std::path::Path;
use watchtower::{JsonExporter, ParsedCase};

/// Returns `true` when every hash in the case file checks out
pub fn execute(case: &Path) -> Result<bool> {
    let parsed = run(case)?;

    println!("\nCase File Verification");
    println!("{}", "=".repeat(60));
    println!("Title: {}", parsed.case.title);
    println!("Generated: {}", parsed.generated_at);
    println!("Evidence checked: {}", parsed.evidence_checks.len());
    println!("Claims checked: {}", parsed.claim_checks.len());

    for check in &parsed.evidence_checks {
        let id = check.id.as_deref().unwrap_or("-");
        if !check.sha256_matches {
            println!("\n  TAMPERED evidence {}", id);
            println!("    stored:   {}", check.stored_sha256);
            println!("    computed: {}", check.computed_sha256);
        } else if !check.fingerprint_matches {
            println!("\n  Fingerprint mismatch on evidence {}", id);
        }
    }
    for check in parsed.claim_checks.iter().filter(|c| !c.fingerprint_matches) {
        println!(
            "\n  Fingerprint mismatch on claim {}",
            check.id.as_deref().unwrap_or("-")
        );
    }

    let intact = parsed.is_intact();
    if intact {
        println!("\nAll hashes verified");
    } else {
        tracing::warn!(case = %case.display(), "Case file failed verification");
    }
    Ok(intact)
}

pub fn run(case: &Path) -> Result<ParsedCase> {
    let raw = super::read(case)?;
    JsonExporter::new()
        .parse(&raw)
        .with_context(|| format!("{} is not a valid case file", case.display()))
}
