//! Storage nodes.
//!
//! A [`Node`] is a named key-value store that owns its entries outright. The
//! ring only decides *which* node a key goes to; everything after that is the
//! node's business, delegated to a [`StorageBackend`].

use std::collections::HashMap;
use std::fmt;

use dashmap::DashMap;

/// Contract for whatever actually holds a node's entries.
///
/// All operations are synchronous from the ring's point of view. `get` must
/// keep "absent" (`None`) distinguishable from a stored empty string.
pub trait StorageBackend: Send + Sync {
    /// Insert or overwrite `key`.
    fn put(&self, key: &str, value: &str);

    /// Point lookup.
    fn get(&self, key: &str) -> Option<String>;

    fn contains(&self, key: &str) -> bool;

    /// Delete `key`. Deleting a missing key is a no-op.
    fn delete(&self, key: &str);

    /// Owned copy of every entry.
    fn snapshot(&self) -> HashMap<String, String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory backend. Each node gets its own map, so operations on
/// different nodes never contend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: DashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn put(&self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    fn snapshot(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Identified key-value store participating in a ring.
///
/// Nodes are created before they join a ring and are shared with it as
/// `Arc<Node>`. Leaving the ring does not touch the node's entries.
pub struct Node {
    id: String,
    backend: Box<dyn StorageBackend>,
}

impl Node {
    /// Construct a node backed by a fresh [`MemoryBackend`].
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_backend(id, MemoryBackend::new())
    }

    pub fn with_backend(id: impl Into<String>, backend: impl StorageBackend + 'static) -> Self {
        Self {
            id: id.into(),
            backend: Box::new(backend),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Upsert `key`.
    pub fn store(&self, key: &str, value: &str) {
        self.backend.put(key, value);
    }

    /// `None` means the key is absent; `Some("")` is a stored empty value.
    pub fn retrieve(&self, key: &str) -> Option<String> {
        self.backend.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.backend.contains(key)
    }

    /// No-op if `key` is absent.
    pub fn remove(&self, key: &str) {
        self.backend.delete(key);
    }

    /// Copy of all entries. Mutating the copy does not affect the node.
    pub fn storage(&self) -> HashMap<String, String> {
        self.backend.snapshot()
    }

    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("entries", &self.len())
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node(id={}, entries={})", self.id, self.len())
    }
}
