//! Watchtower Core: record model and store contracts
//!
//! This crate defines the shared pieces of the watchtower audit trail:
//! - Record model: Evidence, Claim and Artifact with derived SHA-256 hashes
//! - Canonical hashing: key-sorted JSON fingerprints reproducible across runs
//! - Store traits: append-only Evidence, Claim and Artifact stores
//! - Configuration and the error taxonomy shared by every crate
//!
//! Key rules:
//! - No claim without evidence: at least one reference, each one stored
//! - Derived hashes are recomputed from fields, never trusted from storage
//! - Records are never updated or deleted once stored

pub mod config;
pub mod error;
pub mod hash;
pub mod model;
pub mod traits;
pub mod types;

pub use config::{AlertConfig, ExportConfig, WatchtowerConfig};
pub use error::{Result, ValidationError, WatchtowerError};
pub use model::{
    Artifact, ArtifactRecord, ArtifactType, Claim, ClaimRecord, Evidence, EvidenceRecord,
    NewArtifact, NewClaim, NewEvidence, Provenance,
};
pub use traits::{ArtifactStore, ClaimStore, EvidenceStore};
pub use types::{ArtifactFilter, ClaimFilter, EvidenceFilter, Metadata, RecordId};
