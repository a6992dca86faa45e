use crate::evidence::MemoryEvidenceStore;
use crate::record_log::RecordLog;
use crate::new_record_id;
use parking_lot::RwLock;
use std::sync::Arc;
use watchtower_core::{
    hash, Claim, ClaimFilter, ClaimStore, EvidenceStore, NewClaim, Result, WatchtowerError,
};

/// In-memory append-only claim store
///
/// Holds a shared handle to the evidence store it validates against. The
/// claim write lock is held across the evidence lookup and the insert, so
/// lock order is always claim then evidence.
pub struct MemoryClaimStore<E: EvidenceStore = MemoryEvidenceStore> {
    evidence: Arc<E>,
    inner: RwLock<RecordLog<Claim>>,
}

impl<E: EvidenceStore> MemoryClaimStore<E> {
    pub fn new(evidence: Arc<E>) -> Self {
        Self {
            evidence,
            inner: RwLock::new(RecordLog::default()),
        }
    }

    /// The evidence store this claim store validates against
    pub fn evidence_store(&self) -> &Arc<E> {
        &self.evidence
    }
}

impl<E: EvidenceStore> ClaimStore for MemoryClaimStore<E> {
    fn store(&self, draft: NewClaim) -> Result<Claim> {
        let mut inner = self.inner.write();

        let refs: Vec<&str> = draft.evidence_refs().collect();
        let missing = self.evidence.missing_ids(&refs)?;
        if let Some(evidence_id) = missing.into_iter().next() {
            tracing::warn!(
                evidence_id = %evidence_id,
                statement = draft.statement(),
                "Rejected claim referencing unknown evidence"
            );
            return Err(WatchtowerError::ReferentialIntegrity { evidence_id });
        }

        let mut id = new_record_id();
        while inner.contains(&id) {
            id = new_record_id();
        }

        let claim = Claim::create(draft, Some(id.clone()), hash::now()).map_err(|e| {
            tracing::warn!(error = %e, "Rejected invalid claim");
            WatchtowerError::from(e)
        })?;
        let appended = inner.append(id.clone(), claim.clone());
        debug_assert!(appended, "record id {id} was already taken");

        tracing::debug!(
            id = %id,
            confidence = claim.confidence(),
            refs = claim.evidence_count(),
            "Stored claim"
        );
        Ok(claim)
    }

    fn get(&self, id: &str) -> Result<Option<Claim>> {
        Ok(self.inner.read().get(id).cloned())
    }

    fn list(&self, filter: &ClaimFilter) -> Result<Vec<Claim>> {
        let inner = self.inner.read();
        Ok(filter.apply(inner.iter()))
    }

    fn get_by_evidence(&self, evidence_id: &str) -> Result<Vec<Claim>> {
        let inner = self.inner.read();
        Ok(inner
            .iter()
            .filter(|c| c.references(evidence_id))
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.inner.read().len())
    }
}
