//! Audit comparisons between two points in an investigation
//!
//! Both halves are pure functions over record values: nothing here touches a
//! store, so the same inputs always produce the same diff and the same alerts
//! (alert timestamps aside).

pub mod alerts;
pub mod diff;

pub use alerts::{Alert, AlertGenerator, AlertSummary, AlertType, Severity};
pub use diff::{
    diff_artifacts, diff_claims, ArtifactDiff, ClaimChange, ContentDiff, KeyDiff, ModifiedKey,
    RunDiff,
};
