//! Code store: the concurrent code → target mapping.
//!
//! Every backend honors the same contract:
//! - any number of `get` / `exists` / `size` calls may run in parallel
//! - a write (`put` / `insert_if_absent`) excludes every other access for its duration
//! - no reader ever observes a partially-applied write

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod memory;
pub mod sharded;

pub use memory::MemoryStore;
pub use sharded::ShardedStore;

/// Capability set of the code store.
///
/// The generator only ever calls `exists` and `insert_if_absent`; entries are
/// never removed by the core.
pub trait CodeStore: Send + Sync {
    /// Insert or overwrite the entry for `code`.
    fn put(&self, code: &str, target: &str);

    /// Target stored under `code`, `None` when absent.
    fn get(&self, code: &str) -> Option<String>;

    /// Presence probe that does not clone the target.
    fn exists(&self, code: &str) -> bool;

    /// Current entry count. Diagnostics only.
    fn size(&self) -> usize;

    /// Insert `(code, target)` only if `code` is absent, checked inside the
    /// same exclusive section as the write. Returns `false` if the code was
    /// already taken, in which case the existing entry is left untouched.
    fn insert_if_absent(&self, code: &str, target: &str) -> bool;

    /// Backend name, used in logs and `/stats`.
    fn backend_name(&self) -> &'static str;
}

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// 单个读写锁保护的 HashMap
    #[default]
    Memory,
    /// 分片锁（DashMap）
    Sharded,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Sharded => write!(f, "sharded"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sharded" => Ok(Self::Sharded),
            _ => Err(format!(
                "Invalid store backend: '{}'. Valid: memory, sharded",
                s
            )),
        }
    }
}

/// Build a store for the given backend.
pub fn create_store(backend: StoreBackend, initial_capacity: usize) -> Arc<dyn CodeStore> {
    match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::with_capacity(initial_capacity)),
        StoreBackend::Sharded => Arc::new(ShardedStore::with_capacity(initial_capacity)),
    }
}
