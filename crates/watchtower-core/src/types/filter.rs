//! Query filters accepted by the store traits
//!
//! Every filter is conjunctive: a record is returned only if it passes each
//! populated criterion. `since` is inclusive. `limit` truncates after sorting.

use crate::model::{Artifact, ArtifactType, Claim, Evidence};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceFilter {
    pub source: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl EvidenceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, ev: &Evidence) -> bool {
        if let Some(source) = &self.source {
            if ev.source() != source {
                return false;
            }
        }
        if let Some(since) = self.since {
            if ev.timestamp() < since {
                return false;
            }
        }
        true
    }

    /// Filter, sort newest first, then truncate
    pub fn apply<'a, I>(&self, records: I) -> Vec<Evidence>
    where
        I: IntoIterator<Item = &'a Evidence>,
    {
        let mut out: Vec<Evidence> = records
            .into_iter()
            .filter(|ev| self.matches(ev))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        truncate(&mut out, self.limit);
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimFilter {
    pub min_confidence: Option<f64>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl ClaimFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = Some(min_confidence);
        self
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, claim: &Claim) -> bool {
        if let Some(min) = self.min_confidence {
            if claim.confidence() < min {
                return false;
            }
        }
        if let Some(since) = self.since {
            if claim.timestamp() < since {
                return false;
            }
        }
        true
    }

    /// Filter, sort by confidence then timestamp (both descending), then truncate
    pub fn apply<'a, I>(&self, records: I) -> Vec<Claim>
    where
        I: IntoIterator<Item = &'a Claim>,
    {
        let mut out: Vec<Claim> = records
            .into_iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            b.confidence()
                .partial_cmp(&a.confidence())
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.timestamp().cmp(&a.timestamp()))
        });
        truncate(&mut out, self.limit);
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactFilter {
    pub artifact_type: Option<ArtifactType>,
    pub parent_id: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl ArtifactFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, artifact_type: ArtifactType) -> Self {
        self.artifact_type = Some(artifact_type);
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, artifact: &Artifact) -> bool {
        if let Some(t) = self.artifact_type {
            if artifact.artifact_type() != t {
                return false;
            }
        }
        if let Some(parent) = &self.parent_id {
            if artifact.parent_artifact_id() != Some(parent.as_str()) {
                return false;
            }
        }
        if let Some(since) = self.since {
            if artifact.timestamp() < since {
                return false;
            }
        }
        true
    }

    pub fn apply<'a, I>(&self, records: I) -> Vec<Artifact>
    where
        I: IntoIterator<Item = &'a Artifact>,
    {
        let mut out: Vec<Artifact> = records
            .into_iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        truncate(&mut out, self.limit);
        out
    }
}

fn truncate<T>(records: &mut Vec<T>, limit: Option<usize>) {
    if let Some(limit) = limit {
        records.truncate(limit);
    }
}
