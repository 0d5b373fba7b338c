use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::CodeStore;

/// Sharded store backed by `DashMap`.
///
/// Each shard has its own reader-writer lock, so writes to different shards
/// proceed in parallel. Within a shard the usual single-writer/multi-reader
/// discipline holds.
///
/// `size()` visits the shards one after another, so under concurrent writes it
/// may report a count the map never held at any single instant. It is only
/// used for diagnostics.
#[derive(Debug, Default)]
pub struct ShardedStore {
    inner: DashMap<String, String>,
}

impl ShardedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: DashMap::with_capacity(capacity),
        }
    }
}

impl CodeStore for ShardedStore {
    fn put(&self, code: &str, target: &str) {
        self.inner.insert(code.to_string(), target.to_string());
    }

    fn get(&self, code: &str) -> Option<String> {
        self.inner.get(code).map(|entry| entry.value().clone())
    }

    fn exists(&self, code: &str) -> bool {
        self.inner.contains_key(code)
    }

    fn size(&self) -> usize {
        self.inner.len()
    }

    fn insert_if_absent(&self, code: &str, target: &str) -> bool {
        // entry() 持有分片写锁，检查与插入是原子的
        match self.inner.entry(code.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(target.to_string());
                true
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "sharded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let store = ShardedStore::new();
        store.put("k3pQ9z", "https://example.com/a");
        assert_eq!(store.get("k3pQ9z").as_deref(), Some("https://example.com/a"));
        assert!(store.exists("k3pQ9z"));
    }

    #[test]
    fn test_insert_if_absent() {
        let store = ShardedStore::with_capacity(4);
        assert!(store.insert_if_absent("k3pQ9z", "https://a.example"));
        assert!(!store.insert_if_absent("k3pQ9z", "https://b.example"));
        assert_eq!(store.get("k3pQ9z").as_deref(), Some("https://a.example"));
        assert_eq!(store.size(), 1);
    }
}
