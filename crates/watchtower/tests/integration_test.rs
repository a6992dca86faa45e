//! End-to-end investigation flows through the `Watchtower` handle

use serde_json::json;
use watchtower::prelude::*;
use watchtower::{ArtifactType, PluginConfig, Severity};

fn id(record_id: Option<&str>) -> String {
    record_id.expect("stored records have ids").to_string()
}

fn plugin_config(value: serde_json::Value) -> PluginConfig {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_claim_requires_stored_evidence() {
    let wt = Watchtower::new().unwrap();
    let e1 = wt
        .evidence()
        .store(NewEvidence::new(
            "Bank statement showing $50,000 transfer from Company X to Company Y",
            "manual",
        ))
        .unwrap();
    let e2 = wt
        .evidence()
        .store(NewEvidence::new(
            "Corporate filing lists the same director for both companies",
            "manual",
        ))
        .unwrap();

    let claim = wt
        .claims()
        .store(
            NewClaim::new("Company X transferred funds to Company Y", 0.85)
                .with_supporting([id(e1.id()), id(e2.id())]),
        )
        .unwrap();
    assert_eq!(claim.run_fingerprint().len(), 64);

    let err = wt
        .claims()
        .store(NewClaim::new("Unsupported", 0.5).with_supporting(["missing-id"]))
        .unwrap_err();
    assert!(matches!(err, WatchtowerError::ReferentialIntegrity { .. }));
    assert!(err.is_rejection());
    assert_eq!(wt.claims().count().unwrap(), 1);
}

#[test]
fn test_ingest_through_manual_plugin() {
    let wt = Watchtower::new().unwrap();
    assert_eq!(wt.plugins().names(), vec!["manual_entry"]);

    let stored = wt
        .ingest(
            "manual_entry",
            &plugin_config(json!({
                "content": "Email from CFO approving the transfer",
                "metadata": {"mailbox": "cfo"}
            })),
        )
        .unwrap();

    assert_eq!(stored.len(), 1);
    let ev = &stored[0];
    assert_eq!(ev.source(), "manual");
    assert_eq!(ev.metadata()["mailbox"], "cfo");
    assert!(wt.evidence().verify(&id(ev.id())).unwrap());

    let listed = wt
        .evidence()
        .list(&EvidenceFilter::new().with_source("manual"))
        .unwrap();
    assert_eq!(listed, stored);
}

#[test]
fn test_report_versions_form_lineage() {
    let wt = Watchtower::new().unwrap();
    let ev = wt
        .evidence()
        .store(NewEvidence::new("Invoice #42", "manual"))
        .unwrap();
    wt.claims()
        .store(NewClaim::new("Invoice was inflated", 0.4).with_supporting([id(ev.id())]))
        .unwrap();

    let v1 = wt
        .archive_report(&wt.snapshot_case("Case").unwrap(), None)
        .unwrap();
    wt.claims()
        .store(NewClaim::new("Invoice was paid twice", 0.7).with_supporting([id(ev.id())]))
        .unwrap();
    let v2 = wt
        .archive_report(&wt.snapshot_case("Case").unwrap(), v1.id())
        .unwrap();

    assert_eq!(v2.artifact_type(), ArtifactType::Report);
    assert_eq!(v2.parent_artifact_id(), v1.id());
    assert_eq!(v2.metadata()["total_claims"], 2);
    assert_eq!(
        v2.provenance().tool_tag().as_deref(),
        Some(concat!("watchtower:", env!("CARGO_PKG_VERSION")))
    );

    let lineage = wt.artifacts().lineage(&id(v2.id())).unwrap();
    assert_eq!(lineage, vec![v1.clone(), v2.clone()]);

    let diff = diff_artifacts(&v1, &v2);
    assert!(!diff.content_match);
    assert!(!diff.parent_match);
    assert!(diff.content_diff.is_some());

    let parsed = JsonExporter::new().parse(v2.content()).unwrap();
    assert!(parsed.is_intact());
    assert_eq!(parsed.case.claims.len(), 2);
}

#[test]
fn test_alerts_between_runs() {
    let wt = Watchtower::new().unwrap();
    let ev_ids: Vec<String> = (0..5)
        .map(|i| {
            let ev = wt
                .evidence()
                .store(NewEvidence::new(format!("document {i}"), "manual"))
                .unwrap();
            id(ev.id())
        })
        .collect();

    let claim = wt
        .claims()
        .store(NewClaim::new("Well supported and certain", 0.95).with_supporting(ev_ids.clone()))
        .unwrap();

    // A previous run in which the same claim was far less certain
    let previous = Claim::create(
        NewClaim::new(claim.statement(), 0.6).with_supporting(ev_ids),
        claim.id().map(str::to_string),
        claim.timestamp(),
    )
    .unwrap();

    let alerts = wt.alerts(Some(&[previous][..])).unwrap();
    let summary = wt.alert_generator().summarize(&alerts);

    assert_eq!(summary.total_alerts, 3);
    assert_eq!(summary.type_counts["high_confidence_claim"], 1);
    assert_eq!(summary.type_counts["well_supported_claim"], 1);
    assert_eq!(summary.type_counts["confidence_increase"], 1);
    assert_eq!(summary.severity_counts[&Severity::High], 1);
    assert_eq!(summary.severity_counts[&Severity::Medium], 2);
}

#[test]
fn test_run_diff_between_snapshots() {
    let wt = Watchtower::new().unwrap();
    let ev = wt
        .evidence()
        .store(NewEvidence::new("Ledger page", "manual"))
        .unwrap();
    let first = wt
        .claims()
        .store(NewClaim::new("Ledger was altered", 0.5).with_supporting([id(ev.id())]))
        .unwrap();
    let before = wt.claims().list(&ClaimFilter::new()).unwrap();

    // Same claim id re-scored in the later run
    let rescored = Claim::create(
        NewClaim::new(first.statement(), 0.8).with_supporting([id(ev.id())]),
        first.id().map(str::to_string),
        first.timestamp(),
    )
    .unwrap();
    let added = wt
        .claims()
        .store(NewClaim::new("Ledger was backdated", 0.3).with_supporting([id(ev.id())]))
        .unwrap();
    let after = vec![rescored, added.clone()];

    let diff = diff_claims(&before, &after);
    assert_eq!(diff.added_ids, vec![id(added.id())]);
    assert!(diff.removed_ids.is_empty());
    assert_eq!(diff.modified.len(), 1);
    assert!((diff.modified[0].confidence_delta - 0.3).abs() < 1e-6);
    assert_eq!(diff.total_changes, 2);

    assert_eq!(diff_claims(&after, &after).total_changes, 0);
}

#[test]
fn test_case_file_written_to_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let wt = Watchtower::new().unwrap();
    let ev = wt
        .evidence()
        .store(NewEvidence::new("Photo of shipping manifest", "manual").with_tool("ocr", "1.2"))
        .unwrap();
    wt.claims()
        .store(NewClaim::new("Cargo was mislabeled", 0.65).with_counter([id(ev.id())]))
        .unwrap();

    let case = wt.snapshot_default_case().unwrap();
    assert_eq!(case.title, "Watchtower Case File");

    let json_path = temp_dir.path().join("case.json");
    let md_path = temp_dir.path().join("case.md");
    std::fs::write(&json_path, JsonExporter::new().export(&case).unwrap()).unwrap();
    std::fs::write(&md_path, MarkdownExporter::new().export(&case)).unwrap();

    let raw = std::fs::read_to_string(&json_path).unwrap();
    let parsed = JsonExporter::new().parse(&raw).unwrap();
    assert_eq!(parsed.case, case);

    let md = std::fs::read_to_string(&md_path).unwrap();
    assert!(md.contains("**Counter Evidence:**"));
    assert!(md.contains("**Tool:** ocr v1.2"));
}

#[test]
fn test_custom_alert_config_is_used() {
    let config = WatchtowerConfig::new()
        .with_alerts(AlertConfig::new().with_confidence_high_threshold(0.5));
    let wt = Watchtower::with_config(config).unwrap();
    let ev = wt
        .evidence()
        .store(NewEvidence::new("Receipt", "manual"))
        .unwrap();
    wt.claims()
        .store(NewClaim::new("Moderate claim", 0.55).with_supporting([id(ev.id())]))
        .unwrap();

    let alerts = wt.alerts(None).unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::High);
}
