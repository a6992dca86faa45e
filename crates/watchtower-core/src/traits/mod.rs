pub mod artifact;
pub mod claim;
pub mod evidence;

pub use artifact::ArtifactStore;
pub use claim::ClaimStore;
pub use evidence::EvidenceStore;
