use std::collections::HashMap;

use parking_lot::RwLock;

use super::CodeStore;

/// `HashMap` behind a single reader-writer lock.
///
/// Readers share the lock; a writer holds it exclusively. `parking_lot` guards
/// do not poison, so a panic inside a critical section cannot wedge the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }
}

impl CodeStore for MemoryStore {
    fn put(&self, code: &str, target: &str) {
        self.inner.write().insert(code.to_string(), target.to_string());
    }

    fn get(&self, code: &str) -> Option<String> {
        self.inner.read().get(code).cloned()
    }

    fn exists(&self, code: &str) -> bool {
        self.inner.read().contains_key(code)
    }

    fn size(&self) -> usize {
        self.inner.read().len()
    }

    fn insert_if_absent(&self, code: &str, target: &str) -> bool {
        let mut map = self.inner.write();
        // 写锁内再次检查，避免两个调用方同时认领同一个短码
        if map.contains_key(code) {
            return false;
        }
        map.insert(code.to_string(), target.to_string());
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let store = MemoryStore::new();
        store.put("abc123", "https://example.com");
        assert_eq!(store.get("abc123").as_deref(), Some("https://example.com"));
        assert!(store.exists("abc123"));
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_missing_code() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope"), None);
        assert!(!store.exists("nope"));
        assert_eq!(store.size(), 0);
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put("abc123", "https://a.example");
        store.put("abc123", "https://b.example");
        assert_eq!(store.get("abc123").as_deref(), Some("https://b.example"));
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_insert_if_absent_keeps_existing() {
        let store = MemoryStore::new();
        assert!(store.insert_if_absent("abc123", "https://a.example"));
        assert!(!store.insert_if_absent("abc123", "https://b.example"));
        assert_eq!(store.get("abc123").as_deref(), Some("https://a.example"));
    }
}
