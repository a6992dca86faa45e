//! Diff-runs command implementation

use anyhow::Result;
use std::path::Path;
use watchtower::{diff_claims, RunDiff};

pub fn execute(before: &Path, after: &Path) -> Result<()> {
    let diff = run(before, after)?;
    tracing::info!(
        added = diff.added_ids.len(),
        removed = diff.removed_ids.len(),
        modified = diff.modified.len(),
        "Compared runs"
    );
    super::print_json(&diff)
}

pub fn run(before: &Path, after: &Path) -> Result<RunDiff> {
    let before = super::load_claims(before)?;
    let after = super::load_claims(after)?;
    Ok(diff_claims(&before, &after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchtower::{CaseFile, Claim, JsonExporter, NewClaim};

    fn claim(id: &str, confidence: f64) -> Claim {
        Claim::create(
            NewClaim::new("Funds were diverted", confidence).with_supporting(["e1"]),
            Some(id.to_string()),
            watchtower::hash::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_case_file_against_claim_array() {
        let dir = tempfile::tempdir().unwrap();
        let before = dir.path().join("before.json");
        let after = dir.path().join("after.json");

        let original = claim("c1", 0.5);
        let case = CaseFile::new("Run 1").with_claims(vec![original.clone()]);
        std::fs::write(&before, JsonExporter::new().export(&case).unwrap()).unwrap();

        let rescored = Claim::create(
            NewClaim::new(original.statement(), 0.9).with_supporting(["e1"]),
            Some("c1".into()),
            original.timestamp(),
        )
        .unwrap();
        let later = vec![rescored, claim("c2", 0.4)];
        std::fs::write(&after, serde_json::to_string(&later).unwrap()).unwrap();

        let diff = run(&before, &after).unwrap();
        assert_eq!(diff.added_ids, vec!["c2"]);
        assert_eq!(diff.modified.len(), 1);
        assert!((diff.modified[0].confidence_delta - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(run(&missing, &missing).is_err());
    }
}
