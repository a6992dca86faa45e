//! Watchtower: tamper-evident evidence and claim tracking
//!
//! Watchtower records what an investigation knows and why:
//! - **Evidence**: immutable source facts, content-hashed with SHA-256
//! - **Claims**: assertions that must cite stored evidence
//! - **Artifacts**: versioned snapshots such as exported reports
//! - **Audit**: run diffs and alerts comparing two points in time
//!
//! # Quick Start
//!
//! ```no_run
//! use watchtower::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let wt = Watchtower::new()?;
//!
//! let ev = wt.evidence().store(NewEvidence::new("Bank statement", "manual"))?;
//! let ev_id = ev.id().unwrap_or_default().to_string();
//! let claim = wt
//!     .claims()
//!     .store(NewClaim::new("Company X received payment", 0.85).with_supporting([ev_id]))?;
//!
//! let case = wt.snapshot_case("Case #1")?;
//! let report = wt.archive_report(&case, None)?;
//! println!("{} -> {}", claim.run_fingerprint(), report.fingerprint());
//! # Ok(())
//! # }
//! ```

pub mod prelude;
pub mod handle;

pub use watchtower_core::{
    config::{AlertConfig, ExportConfig, WatchtowerConfig},
    error::{Result, ValidationError, WatchtowerError},
    hash,
    model::{
        Artifact, ArtifactType, Claim, Evidence, NewArtifact, NewClaim, NewEvidence, Provenance,
    },
    traits::{ArtifactStore, ClaimStore, EvidenceStore},
    types::{ArtifactFilter, ClaimFilter, EvidenceFilter, Metadata, RecordId},
};

pub use watchtower_store::{MemoryArtifactStore, MemoryClaimStore, MemoryEvidenceStore};

pub use watchtower_audit::{
    diff_artifacts, diff_claims, Alert, AlertGenerator, AlertSummary, AlertType, ArtifactDiff,
    ClaimChange, ContentDiff, KeyDiff, ModifiedKey, RunDiff, Severity,
};

pub use watchtower_plugins::{ManualEntryPlugin, PluginConfig, PluginRegistry, SourcePlugin};

pub use watchtower_export::{CaseFile, JsonExporter, MarkdownExporter, ParsedCase};

pub use handle::Watchtower;
