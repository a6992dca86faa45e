use crate::error::Result;
use crate::model::{Claim, NewClaim};
use crate::types::ClaimFilter;

/// Append-only store of claims bound to one evidence store
pub trait ClaimStore: Send + Sync {
    /// Validate every evidence reference, then append.
    ///
    /// Fails with `ReferentialIntegrity` naming the first missing id, or
    /// with `Validation` if the draft breaks a record invariant. A failed
    /// call leaves the store unchanged.
    fn store(&self, draft: NewClaim) -> Result<Claim>;

    fn get(&self, id: &str) -> Result<Option<Claim>>;

    /// Conjunctive filter sorted by confidence then timestamp, both descending
    fn list(&self, filter: &ClaimFilter) -> Result<Vec<Claim>>;

    /// Every claim referencing `evidence_id`, in store order
    fn get_by_evidence(&self, evidence_id: &str) -> Result<Vec<Claim>>;

    fn count(&self) -> Result<usize>;
}
