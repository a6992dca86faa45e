use crate::error::Result;
use crate::model::{Artifact, NewArtifact};
use crate::types::ArtifactFilter;

/// Append-only store of versioned artifacts
pub trait ArtifactStore: Send + Sync {
    /// Append a new artifact. Parent references are not checked.
    fn store(&self, draft: NewArtifact) -> Result<Artifact>;

    fn get(&self, id: &str) -> Result<Option<Artifact>>;

    fn list(&self, filter: &ArtifactFilter) -> Result<Vec<Artifact>>;

    /// Parent chain ending at `id`, oldest ancestor first.
    ///
    /// Stops at a missing parent or at the first repeated identifier.
    /// Empty when `id` itself is unknown.
    fn lineage(&self, id: &str) -> Result<Vec<Artifact>>;

    fn verify(&self, id: &str) -> Result<bool>;

    fn count(&self) -> Result<usize>;
}
