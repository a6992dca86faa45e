//! In-memory backends for the watchtower store traits
//!
//! Each store is an append-only keyed log guarded by a single
//! `parking_lot::RwLock`. Readers clone out of one read-locked snapshot, so a
//! concurrent `store` is either fully visible or not visible at all.

mod artifact;
mod claim;
mod evidence;
mod record_log;

pub use artifact::MemoryArtifactStore;
pub use claim::MemoryClaimStore;
pub use evidence::MemoryEvidenceStore;

/// Fresh collision-free record identifier
pub(crate) fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
