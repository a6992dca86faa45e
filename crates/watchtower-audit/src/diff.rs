//! Diff engine for claim runs and artifact versions

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use watchtower_core::{Artifact, Claim};

/// Marker reported when artifact contents cannot be compared key by key
pub const RAW_CONTENT_DIFFERS: &str = "Raw content differs";

/// Delta between two claim runs, keyed by claim id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDiff {
    /// Ids present only in the later run, sorted
    pub added_ids: Vec<String>,
    /// Ids present only in the earlier run, sorted
    pub removed_ids: Vec<String>,
    /// Claims present in both runs that changed, sorted by id
    pub modified: Vec<ClaimChange>,
    pub total_changes: usize,
}

impl RunDiff {
    pub fn is_empty(&self) -> bool {
        self.total_changes == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimChange {
    pub id: String,
    pub statement_changed: bool,
    pub confidence_changed: bool,
    /// `after - before`
    pub confidence_delta: f64,
    pub fingerprint_changed: bool,
}

/// Compare two runs of claims.
///
/// Claims without an id are ignored. A duplicated id within one run keeps
/// the last occurrence.
pub fn diff_claims(before: &[Claim], after: &[Claim]) -> RunDiff {
    let before_map = by_id(before);
    let after_map = by_id(after);

    let added_ids: Vec<String> = after_map
        .keys()
        .filter(|id| !before_map.contains_key(*id))
        .map(|id| id.to_string())
        .collect();
    let removed_ids: Vec<String> = before_map
        .keys()
        .filter(|id| !after_map.contains_key(*id))
        .map(|id| id.to_string())
        .collect();

    let mut modified = Vec::new();
    for (id, old) in &before_map {
        let Some(new) = after_map.get(id) else {
            continue;
        };

        let statement_changed = old.statement() != new.statement();
        let confidence_changed = old.confidence() != new.confidence();
        let fingerprint_changed = old.run_fingerprint() != new.run_fingerprint();

        if statement_changed || confidence_changed || fingerprint_changed {
            modified.push(ClaimChange {
                id: id.to_string(),
                statement_changed,
                confidence_changed,
                confidence_delta: new.confidence() - old.confidence(),
                fingerprint_changed,
            });
        }
    }

    let total_changes = added_ids.len() + removed_ids.len() + modified.len();
    RunDiff {
        added_ids,
        removed_ids,
        modified,
        total_changes,
    }
}

fn by_id(claims: &[Claim]) -> BTreeMap<&str, &Claim> {
    claims
        .iter()
        .filter_map(|c| c.id().map(|id| (id, c)))
        .collect()
}

/// Field-by-field comparison of two artifacts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactDiff {
    pub id_match: bool,
    pub type_match: bool,
    pub content_match: bool,
    pub sha256_match: bool,
    pub fingerprint_match: bool,
    pub parent_match: bool,
    /// Present only when the contents differ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_diff: Option<ContentDiff>,
}

impl ArtifactDiff {
    pub fn is_identical(&self) -> bool {
        self.id_match
            && self.type_match
            && self.content_match
            && self.sha256_match
            && self.fingerprint_match
            && self.parent_match
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentDiff {
    /// Both sides are JSON objects
    Structured(KeyDiff),
    Raw,
}

impl Serialize for ContentDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ContentDiff::Structured(keys) => keys.serialize(serializer),
            ContentDiff::Raw => serializer.serialize_str(RAW_CONTENT_DIFFERS),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyDiff {
    pub added_keys: Vec<String>,
    pub removed_keys: Vec<String>,
    pub modified_keys: Vec<ModifiedKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedKey {
    pub key: String,
    pub old_value: Value,
    pub new_value: Value,
}

pub fn diff_artifacts(a: &Artifact, b: &Artifact) -> ArtifactDiff {
    let content_match = a.content() == b.content();

    ArtifactDiff {
        id_match: a.id() == b.id(),
        type_match: a.artifact_type() == b.artifact_type(),
        content_match,
        sha256_match: a.content_hash() == b.content_hash(),
        fingerprint_match: a.fingerprint() == b.fingerprint(),
        parent_match: a.parent_artifact_id() == b.parent_artifact_id(),
        content_diff: (!content_match).then(|| diff_content(a.content(), b.content())),
    }
}

fn diff_content(old: &str, new: &str) -> ContentDiff {
    match (parse_object(old), parse_object(new)) {
        (Some(old), Some(new)) => ContentDiff::Structured(diff_objects(&old, &new)),
        _ => ContentDiff::Raw,
    }
}

fn parse_object(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn diff_objects(old: &Map<String, Value>, new: &Map<String, Value>) -> KeyDiff {
    let old_keys: BTreeSet<&String> = old.keys().collect();
    let new_keys: BTreeSet<&String> = new.keys().collect();

    let modified_keys = old_keys
        .intersection(&new_keys)
        .filter_map(|key| {
            let (o, n) = (&old[key.as_str()], &new[key.as_str()]);
            (o != n).then(|| ModifiedKey {
                key: key.to_string(),
                old_value: o.clone(),
                new_value: n.clone(),
            })
        })
        .collect();

    KeyDiff {
        added_keys: new_keys.difference(&old_keys).map(|k| k.to_string()).collect(),
        removed_keys: old_keys.difference(&new_keys).map(|k| k.to_string()).collect(),
        modified_keys,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use watchtower_core::{ArtifactType, NewArtifact, NewClaim};

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap()
    }

    fn claim(id: &str, statement: &str, confidence: f64) -> Claim {
        Claim::create(
            NewClaim::new(statement, confidence).with_supporting(["e1"]),
            Some(id.to_string()),
            ts(),
        )
        .unwrap()
    }

    fn artifact(id: &str, content: &str) -> Artifact {
        Artifact::create(
            NewArtifact::new(ArtifactType::Report, content),
            Some(id.to_string()),
            ts(),
        )
    }

    #[test]
    fn test_identical_runs_have_no_changes() {
        let run = vec![claim("c1", "a", 0.5), claim("c2", "b", 0.7)];
        let diff = diff_claims(&run, &run);

        assert!(diff.added_ids.is_empty());
        assert!(diff.removed_ids.is_empty());
        assert!(diff.modified.is_empty());
        assert_eq!(diff.total_changes, 0);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_confidence_change_is_reported_with_delta() {
        let before = vec![claim("c1", "a", 0.5), claim("c2", "b", 0.6)];
        let after = vec![claim("c1", "a", 0.8), claim("c2", "b", 0.6)];

        let diff = diff_claims(&before, &after);
        assert_eq!(diff.modified.len(), 1);
        let change = &diff.modified[0];
        assert_eq!(change.id, "c1");
        assert!(change.confidence_changed);
        assert!(change.fingerprint_changed);
        assert!(!change.statement_changed);
        assert!((change.confidence_delta - 0.3).abs() < 1e-6);
        assert_eq!(diff.total_changes, 1);
    }

    #[test]
    fn test_added_and_removed_are_sorted() {
        let before = vec![claim("z", "a", 0.5), claim("keep", "k", 0.5)];
        let after = vec![
            claim("keep", "k", 0.5),
            claim("n2", "b", 0.5),
            claim("n1", "c", 0.5),
        ];

        let diff = diff_claims(&before, &after);
        assert_eq!(diff.added_ids, vec!["n1", "n2"]);
        assert_eq!(diff.removed_ids, vec!["z"]);
        assert_eq!(diff.total_changes, 3);
    }

    #[test]
    fn test_claims_without_id_are_ignored() {
        let anonymous =
            Claim::create(NewClaim::new("x", 0.5).with_supporting(["e1"]), None, ts()).unwrap();
        let diff = diff_claims(&[], &[anonymous]);
        assert_eq!(diff.total_changes, 0);
    }

    #[test]
    fn test_statement_only_change_has_zero_delta() {
        let diff = diff_claims(&[claim("c1", "old", 0.5)], &[claim("c1", "new", 0.5)]);
        let change = &diff.modified[0];
        assert!(change.statement_changed);
        assert!(!change.confidence_changed);
        assert_eq!(change.confidence_delta, 0.0);
    }

    #[test]
    fn test_artifact_structured_diff() {
        let a = artifact("a1", r#"{"title": "Case", "count": 1, "old": true}"#);
        let b = artifact("a1", r#"{"title": "Case", "count": 2, "new": "x"}"#);

        let diff = diff_artifacts(&a, &b);
        assert!(diff.id_match && diff.type_match && diff.parent_match);
        assert!(!diff.content_match && !diff.sha256_match && !diff.fingerprint_match);

        let Some(ContentDiff::Structured(keys)) = diff.content_diff else {
            panic!("expected structured diff");
        };
        assert_eq!(keys.added_keys, vec!["new"]);
        assert_eq!(keys.removed_keys, vec!["old"]);
        assert_eq!(
            keys.modified_keys,
            vec![ModifiedKey {
                key: "count".into(),
                old_value: json!(1),
                new_value: json!(2),
            }]
        );
    }

    #[test]
    fn test_artifact_raw_diff_for_non_objects() {
        let diff = diff_artifacts(&artifact("a", "plain text"), &artifact("a", "[1, 2]"));
        assert_eq!(diff.content_diff, Some(ContentDiff::Raw));
        assert_eq!(
            serde_json::to_value(&diff).unwrap()["content_diff"],
            json!(RAW_CONTENT_DIFFERS)
        );

        let arrays = diff_artifacts(&artifact("a", "[1]"), &artifact("a", "[2]"));
        assert_eq!(arrays.content_diff, Some(ContentDiff::Raw));
    }

    #[test]
    fn test_identical_artifacts_have_no_content_diff() {
        let a = artifact("a", "{}");
        let diff = diff_artifacts(&a, &a.clone());
        assert!(diff.is_identical());
        assert!(diff.content_diff.is_none());
        assert!(serde_json::to_value(&diff)
            .unwrap()
            .get("content_diff")
            .is_none());
    }

    #[test]
    fn test_is_identical_checks_every_match_flag() {
        let a = artifact("a", "{}");
        let mut diff = diff_artifacts(&a, &a.clone());
        diff.sha256_match = false;
        assert!(!diff.is_identical());

        let mut diff = diff_artifacts(&a, &a.clone());
        diff.parent_match = false;
        assert!(!diff.is_identical());
    }
}
