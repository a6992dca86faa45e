use crate::CaseFile;
use chrono::{DateTime, Utc};
use serde_json::Value;
use watchtower_core::{hash, Provenance};

/// Audit-ready case files with claim ids and an evidence appendix
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExporter;

impl MarkdownExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, case: &CaseFile) -> String {
        self.export_at(case, hash::now())
    }

    pub fn export_at(&self, case: &CaseFile, generated_at: DateTime<Utc>) -> String {
        let mut out = String::new();

        push(&mut out, &format!("# {}", case.title));
        push(
            &mut out,
            &format!("**Generated:** {}", hash::iso_timestamp(&generated_at)),
        );

        if !case.metadata.is_empty() {
            push(&mut out, "## Metadata");
            for (key, value) in &case.metadata {
                out.push_str(&format!("- **{}:** {}\n", key, display_value(value)));
            }
            out.push('\n');
        }

        push(&mut out, "## Summary");
        out.push_str(&format!("- **Total Claims:** {}\n", case.claims.len()));
        out.push_str(&format!("- **Total Evidence:** {}\n\n", case.evidence.len()));

        push(&mut out, "## Claims");
        for (i, claim) in case.claims.iter().enumerate() {
            push(
                &mut out,
                &format!("### Claim {} (ID: `{}`)", i + 1, claim.id().unwrap_or("-")),
            );
            push(&mut out, &format!("**Statement:** {}", claim.statement()));
            push(
                &mut out,
                &format!("**Confidence:** {:.2}%", claim.confidence() * 100.0),
            );
            push(
                &mut out,
                &format!("**Run Fingerprint:** `{}`", claim.run_fingerprint()),
            );
            if !claim.supporting_evidence_ids().is_empty() {
                push(
                    &mut out,
                    &format!(
                        "**Supporting Evidence:** {}",
                        code_list(claim.supporting_evidence_ids())
                    ),
                );
            }
            if !claim.counter_evidence_ids().is_empty() {
                push(
                    &mut out,
                    &format!(
                        "**Counter Evidence:** {}",
                        code_list(claim.counter_evidence_ids())
                    ),
                );
            }
            provenance_lines(&mut out, claim.provenance());
            push(
                &mut out,
                &format!("**Timestamp:** {}", hash::iso_timestamp(&claim.timestamp())),
            );
        }

        push(&mut out, "## Evidence Appendix");
        for (i, ev) in case.evidence.iter().enumerate() {
            push(
                &mut out,
                &format!("### Evidence {} (ID: `{}`)", i + 1, ev.id().unwrap_or("-")),
            );
            push(&mut out, &format!("**SHA-256:** `{}`", ev.content_hash()));
            push(&mut out, &format!("**Source:** {}", ev.source()));
            push(&mut out, "**Content:**");
            push(&mut out, &format!("```\n{}\n```", ev.content()));
            provenance_lines(&mut out, ev.provenance());
            push(
                &mut out,
                &format!("**Timestamp:** {}", hash::iso_timestamp(&ev.timestamp())),
            );
            push(&mut out, &format!("**Fingerprint:** `{}`", ev.fingerprint()));
        }

        tracing::debug!(title = %case.title, bytes = out.len(), "Exported Markdown case file");
        out
    }
}

/// Append a paragraph followed by a blank line
fn push(out: &mut String, paragraph: &str) {
    out.push_str(paragraph);
    out.push_str("\n\n");
}

fn code_list(ids: &[String]) -> String {
    ids.iter()
        .map(|id| format!("`{}`", id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn provenance_lines(out: &mut String, p: &Provenance) {
    if let Some(name) = &p.tool_name {
        push(out, &format!("**Tool:** {}", versioned(name, &p.tool_version)));
    }
    if let Some(name) = &p.model_name {
        push(out, &format!("**Model:** {}", versioned(name, &p.model_version)));
    }
}

fn versioned(name: &str, version: &Option<String>) -> String {
    match version {
        Some(v) => format!("{} v{}", name, v),
        None => name.to_string(),
    }
}
