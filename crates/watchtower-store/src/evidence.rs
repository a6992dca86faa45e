use crate::record_log::RecordLog;
use crate::new_record_id;
use parking_lot::RwLock;
use watchtower_core::{hash, Evidence, EvidenceFilter, EvidenceStore, NewEvidence, Result};

struct StoredEvidence {
    record: Evidence,
    /// Content hash taken when the record was appended
    content_hash: String,
}

/// In-memory append-only evidence store
#[derive(Default)]
pub struct MemoryEvidenceStore {
    inner: RwLock<RecordLog<StoredEvidence>>,
}

impl MemoryEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvidenceStore for MemoryEvidenceStore {
    fn store(&self, draft: NewEvidence) -> Result<Evidence> {
        let mut inner = self.inner.write();
        let mut id = new_record_id();
        while inner.contains(&id) {
            id = new_record_id();
        }

        let record = Evidence::create(draft, Some(id.clone()), hash::now());
        let content_hash = record.content_hash();
        let appended = inner.append(
            id.clone(),
            StoredEvidence {
                record: record.clone(),
                content_hash,
            },
        );
        debug_assert!(appended, "record id {id} was already taken");

        tracing::debug!(id = %id, source = record.source(), "Stored evidence");
        Ok(record)
    }

    fn get(&self, id: &str) -> Result<Option<Evidence>> {
        Ok(self.inner.read().get(id).map(|e| e.record.clone()))
    }

    fn list(&self, filter: &EvidenceFilter) -> Result<Vec<Evidence>> {
        let inner = self.inner.read();
        Ok(filter.apply(inner.iter().map(|e| &e.record)))
    }

    fn verify(&self, id: &str) -> Result<bool> {
        let inner = self.inner.read();
        Ok(inner
            .get(id)
            .map(|e| e.record.verify_content_hash(&e.content_hash))
            .unwrap_or(false))
    }

    fn count(&self) -> Result<usize> {
        Ok(self.inner.read().len())
    }

    fn missing_ids(&self, ids: &[&str]) -> Result<Vec<String>> {
        let inner = self.inner.read();
        Ok(ids
            .iter()
            .filter(|id| !inner.contains(id))
            .map(|id| id.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;

    #[test]
    fn test_store_assigns_unique_ids() {
        let store = MemoryEvidenceStore::new();
        let ids: HashSet<String> = (0..50)
            .map(|i| {
                store
                    .store(NewEvidence::new(format!("item {}", i), "manual"))
                    .unwrap()
                    .id()
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert_eq!(ids.len(), 50);
        assert_eq!(store.count().unwrap(), 50);
    }

    #[test]
    fn test_get_absent_is_none() {
        let store = MemoryEvidenceStore::new();
        assert!(store.get("nope").unwrap().is_none());
        assert!(!store.verify("nope").unwrap());
    }

    #[test]
    fn test_stored_value_matches_get() {
        let store = MemoryEvidenceStore::new();
        let ev = store
            .store(
                NewEvidence::new("bank statement", "manual")
                    .with_metadata_entry("account", "123")
                    .with_tool("watchtower", "0.1.0"),
            )
            .unwrap();

        let fetched = store.get(ev.id().unwrap()).unwrap().unwrap();
        assert_eq!(fetched, ev);
        assert_eq!(fetched.fingerprint(), ev.fingerprint());
        assert!(store.verify(ev.id().unwrap()).unwrap());
    }

    #[test]
    fn test_list_filters_conjunctively() {
        let store = MemoryEvidenceStore::new();
        let first = store.store(NewEvidence::new("a", "manual")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let cutoff = first.timestamp() + Duration::microseconds(1);
        store.store(NewEvidence::new("b", "api")).unwrap();
        let third = store.store(NewEvidence::new("c", "manual")).unwrap();

        let result = store
            .list(&EvidenceFilter::new().with_source("manual").with_since(cutoff))
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id(), third.id());

        let newest_first = store.list(&EvidenceFilter::new()).unwrap();
        assert_eq!(newest_first.len(), 3);
        assert_eq!(newest_first.last().unwrap().id(), first.id());
    }

    #[test]
    fn test_missing_ids_preserves_input_order() {
        let store = MemoryEvidenceStore::new();
        let ev = store.store(NewEvidence::new("a", "manual")).unwrap();
        let id = ev.id().unwrap();

        let missing = store.missing_ids(&["x", id, "y"]).unwrap();
        assert_eq!(missing, vec!["x".to_string(), "y".to_string()]);
        assert!(store.contains(id).unwrap());
    }
}
