//! Artifact: derived content with optional parent lineage

use crate::hash::{self, CanonicalFields};
use crate::model::Provenance;
use crate::types::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of derived content an artifact holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Evidence,
    Claim,
    Derived,
    Report,
}

impl ArtifactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::Evidence => "evidence",
            ArtifactType::Claim => "claim",
            ArtifactType::Derived => "derived",
            ArtifactType::Report => "report",
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evidence" => Ok(ArtifactType::Evidence),
            "claim" => Ok(ArtifactType::Claim),
            "derived" => Ok(ArtifactType::Derived),
            "report" => Ok(ArtifactType::Report),
            other => Err(format!("unknown artifact type: {}", other)),
        }
    }
}

/// Caller-supplied fields for a new artifact
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtifact {
    artifact_type: ArtifactType,
    content: String,
    parent_artifact_id: Option<String>,
    metadata: Metadata,
    provenance: Provenance,
}

impl NewArtifact {
    pub fn new(artifact_type: ArtifactType, content: impl Into<String>) -> Self {
        Self {
            artifact_type,
            content: content.into(),
            parent_artifact_id: None,
            metadata: Metadata::new(),
            provenance: Provenance::default(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_artifact_id = Some(parent_id.into());
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

    pub fn artifact_type(&self) -> ArtifactType {
        self.artifact_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn parent_artifact_id(&self) -> Option<&str> {
        self.parent_artifact_id.as_deref()
    }
}

/// Stored artifact record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ArtifactRecord", from = "ArtifactRecord")]
pub struct Artifact {
    id: Option<String>,
    artifact_type: ArtifactType,
    content: String,
    parent_artifact_id: Option<String>,
    metadata: Metadata,
    provenance: Provenance,
    timestamp: DateTime<Utc>,
}

impl Artifact {
    pub fn new(draft: NewArtifact) -> Self {
        Self::create(draft, None, hash::now())
    }

    pub fn create(draft: NewArtifact, id: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            artifact_type: draft.artifact_type,
            content: draft.content,
            parent_artifact_id: draft.parent_artifact_id,
            metadata: draft.metadata,
            provenance: draft.provenance,
            timestamp,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn artifact_type(&self) -> ArtifactType {
        self.artifact_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn parent_artifact_id(&self) -> Option<&str> {
        self.parent_artifact_id.as_deref()
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

    pub fn content_hash(&self) -> String {
        hash::sha256_hex(self.content.as_bytes())
    }

    /// Fingerprint over content hash, type, parent, timestamp and provenance
    pub fn fingerprint(&self) -> String {
        CanonicalFields::new()
            .field("content_hash", self.content_hash())
            .field("artifact_type", self.artifact_type.as_str())
            .field("parent_id", self.parent_artifact_id.clone())
            .field("timestamp", hash::iso_timestamp(&self.timestamp))
            .field("tool", self.provenance.tool_tag())
            .field("model", self.provenance.model_tag())
            .digest()
    }

    pub fn verify_content_hash(&self, expected: &str) -> bool {
        self.content_hash() == expected
    }
}

/// Flat persisted form of [`Artifact`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub artifact_type: ArtifactType,
    pub content: String,
    #[serde(default)]
    pub parent_artifact_id: Option<String>,
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

impl ArtifactRecord {
    pub fn stored_hash_matches(&self) -> bool {
        match &self.content_hash {
            Some(stored) => hash::sha256_hex(self.content.as_bytes()) == *stored,
            None => true,
        }
    }
}

impl From<Artifact> for ArtifactRecord {
    fn from(a: Artifact) -> Self {
        let content_hash = Some(a.content_hash());
        let fingerprint = Some(a.fingerprint());
        Self {
            id: a.id,
            artifact_type: a.artifact_type,
            content: a.content,
            parent_artifact_id: a.parent_artifact_id,
            metadata: a.metadata,
            provenance: a.provenance,
            timestamp: a.timestamp,
            content_hash,
            fingerprint,
        }
    }
}

impl From<ArtifactRecord> for Artifact {
    fn from(rec: ArtifactRecord) -> Self {
        Self {
            id: rec.id,
            artifact_type: rec.artifact_type,
            content: rec.content,
            parent_artifact_id: rec.parent_artifact_id,
            metadata: rec.metadata,
            provenance: rec.provenance,
            timestamp: rec.timestamp,
        }
    }
}
