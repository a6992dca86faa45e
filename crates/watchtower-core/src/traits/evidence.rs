use crate::error::Result;
use crate::model::{Evidence, NewEvidence};
use crate::types::EvidenceFilter;

/// Append-only store of evidence records
///
/// Provides:
/// - Identifier and timestamp assignment on `store`
/// - Snapshot-consistent filtered listing
/// - Content re-hashing for tamper checks
pub trait EvidenceStore: Send + Sync {
    /// Append a new record and return it as stored
    fn store(&self, draft: NewEvidence) -> Result<Evidence>;

    /// Lookup by identifier; `None` is a normal outcome
    fn get(&self, id: &str) -> Result<Option<Evidence>>;

    /// Conjunctive filter, newest first, truncated to `limit`
    fn list(&self, filter: &EvidenceFilter) -> Result<Vec<Evidence>>;

    /// Recompute the content hash from raw bytes and compare it with the
    /// hash recorded at store time. `false` when the id is unknown.
    fn verify(&self, id: &str) -> Result<bool>;

    fn count(&self) -> Result<usize>;

    /// Identifiers from `ids` that are not present, in input order.
    ///
    /// Evaluated against one consistent snapshot.
    fn missing_ids(&self, ids: &[&str]) -> Result<Vec<String>>;

    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.missing_ids(&[id])?.is_empty())
    }
}
