//! Evidence: an immutable source fact

use crate::hash::{self, CanonicalFields};
use crate::model::Provenance;
use crate::types::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied fields for a new piece of evidence
///
/// The identifier and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvidence {
    content: String,
    source: String,
    metadata: Metadata,
    provenance: Provenance,
}

impl NewEvidence {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
            metadata: Metadata::new(),
            provenance: Provenance::default(),
        }
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

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

/// Stored evidence record
///
/// Fields are read-only; `content_hash` and `fingerprint` are derived from
/// them on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EvidenceRecord", from = "EvidenceRecord")]
pub struct Evidence {
    id: Option<String>,
    content: String,
    source: String,
    metadata: Metadata,
    provenance: Provenance,
    timestamp: DateTime<Utc>,
}

impl Evidence {
    /// Unstored evidence stamped with the current time
    pub fn new(draft: NewEvidence) -> Self {
        Self::create(draft, None, hash::now())
    }

    /// Build a record with an explicit identifier and timestamp
    pub fn create(draft: NewEvidence, id: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            content: draft.content,
            source: draft.source,
            metadata: draft.metadata,
            provenance: draft.provenance,
            timestamp,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> &str {
        &self.source
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

    /// SHA-256 of the UTF-8 content bytes
    pub fn content_hash(&self) -> String {
        hash::sha256_hex(self.content.as_bytes())
    }

    /// Reproducibility fingerprint over content hash, timestamp and provenance
    pub fn fingerprint(&self) -> String {
        CanonicalFields::new()
            .field("content_hash", self.content_hash())
            .field("timestamp", hash::iso_timestamp(&self.timestamp))
            .field("tool", self.provenance.tool_tag())
            .field("model", self.provenance.model_tag())
            .digest()
    }

    /// Compare a claimed digest against one recomputed from the content bytes
    pub fn verify_content_hash(&self, expected: &str) -> bool {
        hash::sha256_hex(self.content.as_bytes()) == expected
    }
}

/// Flat persisted form of [`Evidence`]
///
/// Hash fields are written for readers but ignored on load; they are always
/// recomputed from the source fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub content: String,
    pub source: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(flatten)]
    pub provenance: Provenance,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl EvidenceRecord {
    /// False when a stored `content_hash` disagrees with the content
    pub fn stored_hash_matches(&self) -> bool {
        match &self.content_hash {
            Some(stored) => hash::sha256_hex(self.content.as_bytes()) == *stored,
            None => true,
        }
    }
}

impl From<Evidence> for EvidenceRecord {
    fn from(ev: Evidence) -> Self {
        let content_hash = Some(ev.content_hash());
        let fingerprint = Some(ev.fingerprint());
        Self {
            id: ev.id,
            content: ev.content,
            source: ev.source,
            metadata: ev.metadata,
            provenance: ev.provenance,
            timestamp: ev.timestamp,
            content_hash,
            fingerprint,
        }
    }
}

impl From<EvidenceRecord> for Evidence {
    fn from(rec: EvidenceRecord) -> Self {
        Self {
            id: rec.id,
            content: rec.content,
            source: rec.source,
            metadata: rec.metadata,
            provenance: rec.provenance,
            timestamp: rec.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, sec).unwrap()
    }

    #[test]
    fn test_content_hash_deterministic() {
        let a = Evidence::new(NewEvidence::new("Test evidence content", "manual"));
        let b = Evidence::new(NewEvidence::new("Test evidence content", "scraped"));

        assert_eq!(a.content_hash().len(), 64);
        assert_eq!(a.content_hash(), b.content_hash());
        assert_eq!(
            a.content_hash(),
            hash::sha256_hex("Test evidence content".as_bytes())
        );
    }

    #[test]
    fn test_fingerprint_depends_on_timestamp_and_provenance() {
        let draft = NewEvidence::new("same content", "manual");

        let a = Evidence::create(draft.clone(), None, ts(0));
        let b = Evidence::create(draft.clone(), None, ts(1));
        let c = Evidence::create(draft.clone().with_tool("watchtower", "0.1.0"), None, ts(0));
        let d = Evidence::create(draft, None, ts(0));

        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint(), d.fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_source_and_metadata() {
        let a = Evidence::create(NewEvidence::new("x", "manual"), None, ts(0));
        let b = Evidence::create(
            NewEvidence::new("x", "api").with_metadata_entry("k", "v"),
            Some("other-id".into()),
            ts(0),
        );
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_metadata_not_shared_between_records() {
        let a = NewEvidence::new("a", "manual").with_metadata_entry("key", "value");
        let b = NewEvidence::new("b", "manual");

        assert_eq!(a.metadata().len(), 1);
        assert!(b.metadata().is_empty());
    }

    #[test]
    fn test_serialize_includes_hashes_and_load_recomputes() {
        let ev = Evidence::create(
            NewEvidence::new("bank statement", "manual").with_tool("watchtower", "0.1.0"),
            Some("e1".into()),
            ts(0),
        );
        let mut value = serde_json::to_value(&ev).unwrap();
        assert_eq!(value["content_hash"], ev.content_hash());
        assert_eq!(value["fingerprint"], ev.fingerprint());
        assert_eq!(value["tool_name"], "watchtower");

        // A forged hash on disk is never trusted
        value["content_hash"] = serde_json::json!("0".repeat(64));
        let loaded: Evidence = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(loaded, ev);
        assert_eq!(loaded.content_hash(), ev.content_hash());

        let record: EvidenceRecord = serde_json::from_value(value).unwrap();
        assert!(!record.stored_hash_matches());
    }

    #[test]
    fn test_verify_content_hash() {
        let ev = Evidence::new(NewEvidence::new("payload", "manual"));
        assert!(ev.verify_content_hash(&ev.content_hash()));
        assert!(!ev.verify_content_hash(&hash::sha256_hex(b"tampered")));
    }
}
