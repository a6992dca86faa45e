use crate::record_log::RecordLog;
use crate::new_record_id;
use parking_lot::RwLock;
use std::collections::HashSet;
use watchtower_core::{hash, Artifact, ArtifactFilter, ArtifactStore, NewArtifact, Result};

struct StoredArtifact {
    record: Artifact,
    content_hash: String,
}

/// In-memory append-only artifact store with parent lineage
#[derive(Default)]
pub struct MemoryArtifactStore {
    inner: RwLock<RecordLog<StoredArtifact>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn store(&self, draft: NewArtifact) -> Result<Artifact> {
        let mut inner = self.inner.write();
        let mut id = new_record_id();
        while inner.contains(&id) {
            id = new_record_id();
        }

        if let Some(parent) = draft.parent_artifact_id() {
            if !inner.contains(parent) {
                tracing::debug!(parent = parent, "Artifact parent is not in this store");
            }
        }

        let record = Artifact::create(draft, Some(id.clone()), hash::now());
        let content_hash = record.content_hash();
        let appended = inner.append(
            id.clone(),
            StoredArtifact {
                record: record.clone(),
                content_hash,
            },
        );
        debug_assert!(appended, "record id {id} was already taken");

        tracing::debug!(
            id = %id,
            artifact_type = %record.artifact_type(),
            parent = ?record.parent_artifact_id(),
            "Stored artifact"
        );
        Ok(record)
    }

    fn get(&self, id: &str) -> Result<Option<Artifact>> {
        Ok(self.inner.read().get(id).map(|a| a.record.clone()))
    }

    fn list(&self, filter: &ArtifactFilter) -> Result<Vec<Artifact>> {
        let inner = self.inner.read();
        Ok(filter.apply(inner.iter().map(|a| &a.record)))
    }

    fn lineage(&self, id: &str) -> Result<Vec<Artifact>> {
        let inner = self.inner.read();
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(id.to_string());

        while let Some(cur) = current.take() {
            let Some(entry) = inner.get(&cur) else {
                break;
            };
            if !visited.insert(cur.clone()) {
                tracing::warn!(id = %cur, start = id, "Artifact lineage contains a cycle");
                break;
            }
            chain.push(entry.record.clone());
            current = entry.record.parent_artifact_id().map(str::to_string);
        }

        chain.reverse();
        Ok(chain)
    }

    fn verify(&self, id: &str) -> Result<bool> {
        let inner = self.inner.read();
        Ok(inner
            .get(id)
            .map(|a| a.record.verify_content_hash(&a.content_hash))
            .unwrap_or(false))
    }

    fn count(&self) -> Result<usize> {
        Ok(self.inner.read().len())
    }
}
