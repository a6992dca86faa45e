//! Claim: an analytical assertion backed by evidence references

use crate::error::ValidationError;
use crate::hash::{self, CanonicalFields};
use crate::model::Provenance;
use crate::types::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied fields for a new claim
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaim {
    statement: String,
    confidence: f64,
    supporting_evidence_ids: Vec<String>,
    counter_evidence_ids: Vec<String>,
    metadata: Metadata,
    provenance: Provenance,
}

impl NewClaim {
    pub fn new(statement: impl Into<String>, confidence: f64) -> Self {
        Self {
            statement: statement.into(),
            confidence,
            supporting_evidence_ids: Vec::new(),
            counter_evidence_ids: Vec::new(),
            metadata: Metadata::new(),
            provenance: Provenance::default(),
        }
    }

    pub fn with_supporting<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supporting_evidence_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_counter<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.counter_evidence_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_tool(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.provenance = self.provenance.with_tool(name, version);
        self
    }

    pub fn with_model(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.provenance = self.provenance.with_model(name, version);
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Supporting ids followed by counter ids
    pub fn evidence_refs(&self) -> impl Iterator<Item = &str> {
        self.supporting_evidence_ids
            .iter()
            .chain(self.counter_evidence_ids.iter())
            .map(String::as_str)
    }
}

/// Stored claim record
///
/// Construction enforces both record invariants: at least one evidence
/// reference, and a confidence inside `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ClaimRecord", try_from = "ClaimRecord")]
pub struct Claim {
    id: Option<String>,
    statement: String,
    confidence: f64,
    supporting_evidence_ids: Vec<String>,
    counter_evidence_ids: Vec<String>,
    metadata: Metadata,
    provenance: Provenance,
    timestamp: DateTime<Utc>,
}

impl Claim {
    /// Unstored claim stamped with the current time
    pub fn new(draft: NewClaim) -> Result<Self, ValidationError> {
        Self::create(draft, None, hash::now())
    }

    /// Build a claim with an explicit identifier and timestamp
    pub fn create(
        draft: NewClaim,
        id: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&draft.confidence) {
            return Err(ValidationError::ConfidenceOutOfRange(draft.confidence));
        }
        if draft.supporting_evidence_ids.is_empty() && draft.counter_evidence_ids.is_empty() {
            return Err(ValidationError::NoEvidenceRefs);
        }

        Ok(Self {
            id,
            statement: draft.statement,
            confidence: draft.confidence,
            supporting_evidence_ids: draft.supporting_evidence_ids,
            counter_evidence_ids: draft.counter_evidence_ids,
            metadata: draft.metadata,
            provenance: draft.provenance,
            timestamp,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn supporting_evidence_ids(&self) -> &[String] {
        &self.supporting_evidence_ids
    }

    pub fn counter_evidence_ids(&self) -> &[String] {
        &self.counter_evidence_ids
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Supporting ids followed by counter ids, in stored order
    pub fn evidence_refs(&self) -> Vec<String> {
        self.supporting_evidence_ids
            .iter()
            .chain(self.counter_evidence_ids.iter())
            .cloned()
            .collect()
    }

    pub fn evidence_count(&self) -> usize {
        self.supporting_evidence_ids.len() + self.counter_evidence_ids.len()
    }

    pub fn references(&self, evidence_id: &str) -> bool {
        self.supporting_evidence_ids
            .iter()
            .chain(self.counter_evidence_ids.iter())
            .any(|id| id == evidence_id)
    }

    /// Reproducibility fingerprint of this claim
    ///
    /// Evidence lists are sorted before hashing, so reordering references
    /// does not change the fingerprint.
    pub fn run_fingerprint(&self) -> String {
        let mut supporting = self.supporting_evidence_ids.clone();
        supporting.sort();
        let mut counter = self.counter_evidence_ids.clone();
        counter.sort();

        CanonicalFields::new()
            .field("statement_hash", hash::sha256_hex(self.statement.as_bytes()))
            .field("confidence", self.confidence)
            .field("supporting_evidence", supporting)
            .field("counter_evidence", counter)
            .field("timestamp", hash::iso_timestamp(&self.timestamp))
            .field("tool", self.provenance.tool_tag())
            .field("model", self.provenance.model_tag())
            .digest()
    }
}

/// Flat persisted form of [`Claim`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub statement: String,
    pub confidence: f64,
    #[serde(default)]
    pub supporting_evidence_ids: Vec<String>,
    #[serde(default)]
    pub counter_evidence_ids: Vec<String>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(flatten)]
    pub provenance: Provenance,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_refs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_fingerprint: Option<String>,
}

impl From<Claim> for ClaimRecord {
    fn from(claim: Claim) -> Self {
        let evidence_refs = Some(claim.evidence_refs());
        let run_fingerprint = Some(claim.run_fingerprint());
        Self {
            id: claim.id,
            statement: claim.statement,
            confidence: claim.confidence,
            supporting_evidence_ids: claim.supporting_evidence_ids,
            counter_evidence_ids: claim.counter_evidence_ids,
            metadata: claim.metadata,
            provenance: claim.provenance,
            timestamp: claim.timestamp,
            evidence_refs,
            run_fingerprint,
        }
    }
}

impl TryFrom<ClaimRecord> for Claim {
    type Error = ValidationError;

    fn try_from(rec: ClaimRecord) -> Result<Self, Self::Error> {
        let draft = NewClaim {
            statement: rec.statement,
            confidence: rec.confidence,
            supporting_evidence_ids: rec.supporting_evidence_ids,
            counter_evidence_ids: rec.counter_evidence_ids,
            metadata: rec.metadata,
            provenance: rec.provenance,
        };
        Claim::create(draft, rec.id, rec.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_claim_requires_evidence() {
        let err = Claim::new(NewClaim::new("Company X received payment", 0.8)).unwrap_err();
        assert_eq!(err, ValidationError::NoEvidenceRefs);
    }

    #[test]
    fn test_single_reference_of_either_kind_is_enough() {
        assert!(Claim::new(NewClaim::new("s", 0.5).with_supporting(["e1"])).is_ok());
        assert!(Claim::new(NewClaim::new("s", 0.5).with_counter(["e1"])).is_ok());
    }

    #[test]
    fn test_confidence_bounds() {
        for ok in [0.0, 0.5, 1.0] {
            assert!(Claim::new(NewClaim::new("s", ok).with_supporting(["e1"])).is_ok());
        }
        for bad in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let err = Claim::new(NewClaim::new("s", bad).with_supporting(["e1"])).unwrap_err();
            assert!(matches!(err, ValidationError::ConfidenceOutOfRange(_)));
        }
    }

    #[test]
    fn test_evidence_refs_order() {
        let claim = Claim::new(
            NewClaim::new("s", 0.7)
                .with_supporting(["e2", "e1"])
                .with_counter(["e3"]),
        )
        .unwrap();

        assert_eq!(claim.evidence_refs(), vec!["e2", "e1", "e3"]);
        assert_eq!(claim.evidence_count(), 3);
        assert!(claim.references("e3"));
        assert!(!claim.references("e4"));
    }

    #[test]
    fn test_run_fingerprint_ignores_reference_order() {
        let a = Claim::create(
            NewClaim::new("s", 0.7).with_supporting(["e1", "e2"]),
            None,
            ts(),
        )
        .unwrap();
        let b = Claim::create(
            NewClaim::new("s", 0.7).with_supporting(["e2", "e1"]),
            None,
            ts(),
        )
        .unwrap();

        assert_eq!(a.run_fingerprint(), b.run_fingerprint());
        assert_eq!(a.run_fingerprint().len(), 64);
        assert_ne!(a.evidence_refs(), b.evidence_refs());
    }

    #[test]
    fn test_run_fingerprint_tracks_confidence_and_statement() {
        let base = NewClaim::new("s", 0.7).with_supporting(["e1"]);
        let a = Claim::create(base.clone(), None, ts()).unwrap();
        let b = Claim::create(NewClaim::new("s", 0.8).with_supporting(["e1"]), None, ts()).unwrap();
        let c = Claim::create(NewClaim::new("t", 0.7).with_supporting(["e1"]), None, ts()).unwrap();

        assert_ne!(a.run_fingerprint(), b.run_fingerprint());
        assert_ne!(a.run_fingerprint(), c.run_fingerprint());
        // Identifier is not part of the fingerprint
        let d = Claim::create(base, Some("c1".into()), ts()).unwrap();
        assert_eq!(a.run_fingerprint(), d.run_fingerprint());
    }

    #[test]
    fn test_deserialize_revalidates() {
        let claim = Claim::create(
            NewClaim::new("s", 0.7).with_supporting(["e1"]),
            Some("c1".into()),
            ts(),
        )
        .unwrap();
        let mut value = serde_json::to_value(&claim).unwrap();
        assert_eq!(value["run_fingerprint"], claim.run_fingerprint());
        assert_eq!(value["evidence_refs"], serde_json::json!(["e1"]));

        let loaded: Claim = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(loaded, claim);

        value["supporting_evidence_ids"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Claim>(value.clone()).is_err());

        value["supporting_evidence_ids"] = serde_json::json!(["e1"]);
        value["confidence"] = serde_json::json!(1.5);
        assert!(serde_json::from_value::<Claim>(value).is_err());
    }
}
