pub mod artifact;
pub mod claim;
pub mod evidence;
pub mod provenance;

pub use artifact::{Artifact, ArtifactRecord, ArtifactType, NewArtifact};
pub use claim::{Claim, ClaimRecord, NewClaim};
pub use evidence::{Evidence, EvidenceRecord, NewEvidence};
pub use provenance::Provenance;
