use watchtower_core::{Claim, Evidence, Metadata};

/// Snapshot of an investigation handed to an exporter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseFile {
    pub title: String,
    pub metadata: Metadata,
    pub claims: Vec<Claim>,
    pub evidence: Vec<Evidence>,
}

impl CaseFile {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_claims(mut self, claims: Vec<Claim>) -> Self {
        self.claims = claims;
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<Evidence>) -> Self {
        self.evidence = evidence;
        self
    }
}
