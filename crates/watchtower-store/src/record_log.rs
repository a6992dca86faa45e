use std::collections::HashMap;

/// Append-only keyed collection remembering insertion order
#[derive(Debug)]
pub(crate) struct RecordLog<T> {
    by_id: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for RecordLog<T> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> RecordLog<T> {
    /// Append under a fresh id. Existing entries are never replaced.
    pub fn append(&mut self, id: String, value: T) -> bool {
        if self.by_id.contains_key(&id) {
            return false;
        }
        self.order.push(id.clone());
        self.by_id.insert(id, value);
        true
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(move |id| self.by_id.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order_and_rejects_reuse() {
        let mut log = RecordLog::default();
        assert!(log.append("b".to_string(), 1));
        assert!(log.append("a".to_string(), 2));
        assert!(!log.append("b".to_string(), 3));

        assert_eq!(log.len(), 2);
        assert_eq!(log.get("b"), Some(&1));
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }
}
