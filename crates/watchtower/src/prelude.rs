//! Watchtower Prelude
//!
//! ```
//! use watchtower::prelude::*;
//! ```

// Core types
pub use crate::{
    Artifact, ArtifactType, Claim, Evidence, NewArtifact, NewClaim, NewEvidence, Provenance,
    Result, ValidationError, Watchtower, WatchtowerError,
};

// Configs
pub use crate::{AlertConfig, ExportConfig, WatchtowerConfig};

// Traits
pub use crate::{ArtifactStore, ClaimStore, EvidenceStore, SourcePlugin};

// Filters
pub use crate::{ArtifactFilter, ClaimFilter, EvidenceFilter};

// Audit
pub use crate::{diff_artifacts, diff_claims, Alert, AlertGenerator, AlertSummary, RunDiff};

// Export
pub use crate::{CaseFile, JsonExporter, MarkdownExporter};

// Re-export common external deps
pub use anyhow;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tracing;
