//! File-level facade over the ring.
//!
//! Every operation resolves the file name to its owning node and then
//! delegates to that node. The only error the facade raises itself is
//! [`EmptyRing`](crate::Error::EmptyRing).
//!
//! Membership changes do not move data. Removing a node makes every file it
//! held unreachable, and files whose owner changes because a node joined are
//! looked up on the new owner and reported missing. This is the intended
//! behaviour of the store, not an oversight.

use std::sync::Arc;

use tracing::debug;

use crate::config::RingConfig;
use crate::error::Result;
use crate::node::Node;
use crate::partitioner::{AnyPartitioner, Partitioner};
use crate::ring::{HashRing, RingBuilder};

/// Distributed file store backed by a consistent hash ring.
#[derive(Debug)]
pub struct FileStore<P: Partitioner = AnyPartitioner> {
    ring: HashRing<P>,
}

impl FileStore<AnyPartitioner> {
    /// Empty store with default ring settings.
    pub fn new() -> Self {
        Self {
            ring: HashRing::new(),
        }
    }

    /// Store whose ring is configured and populated from `config`.
    pub fn from_config(config: &RingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_ring(RingBuilder::from_config(config).build()?))
    }
}

impl Default for FileStore<AnyPartitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> FileStore<P> {
    pub fn with_ring(ring: HashRing<P>) -> Self {
        Self { ring }
    }

    pub fn ring(&self) -> &HashRing<P> {
        &self.ring
    }

    /// Create an in-memory node called `node_id` and add it to the ring.
    pub fn add_node(&self, node_id: &str) -> Result<Arc<Node>> {
        self.ring.add_node(Node::new(node_id))
    }

    /// Add a pre-built node, e.g. one with a custom backend.
    pub fn add(&self, node: Node) -> Result<Arc<Node>> {
        self.ring.add_node(node)
    }

    /// Remove `node_id` from the ring. Its files become unreachable.
    pub fn remove_node(&self, node_id: &str) -> Result<Arc<Node>> {
        self.ring.remove_node(node_id)
    }

    pub fn store_file(&self, name: &str, content: &str) -> Result<()> {
        let node = self.ring.resolve(name)?;
        node.store(name, content);
        debug!(file = name, node_id = node.id(), bytes = content.len(), "stored file");
        Ok(())
    }

    /// `Ok(None)` when the owning node has no such file.
    pub fn retrieve_file(&self, name: &str) -> Result<Option<String>> {
        Ok(self.ring.resolve(name)?.retrieve(name))
    }

    pub fn contains_file(&self, name: &str) -> Result<bool> {
        Ok(self.ring.resolve(name)?.contains_key(name))
    }

    pub fn remove_file(&self, name: &str) -> Result<()> {
        let node = self.ring.resolve(name)?;
        node.remove(name);
        debug!(file = name, node_id = node.id(), "removed file");
        Ok(())
    }

    /// Id of the node that owns `name`, without touching its storage.
    pub fn locate(&self, name: &str) -> Result<String> {
        self.ring.resolve(name).map(|node| node.id().to_owned())
    }

    pub fn list_nodes(&self) -> Vec<Arc<Node>> {
        self.ring.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.ring.node_count()
    }
}

impl<P: Partitioner> From<HashRing<P>> for FileStore<P> {
    fn from(ring: HashRing<P>) -> Self {
        Self::with_ring(ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn store_abc() -> FileStore {
        let store = FileStore::new();
        for id in ["A", "B", "C"] {
            store.add_node(id).unwrap();
        }
        store
    }

    #[test]
    fn test_empty_store_errors() {
        let store = FileStore::new();
        assert_eq!(store.store_file("f", "x"), Err(Error::EmptyRing));
        assert_eq!(store.retrieve_file("f"), Err(Error::EmptyRing));
        assert_eq!(store.contains_file("f"), Err(Error::EmptyRing));
        assert_eq!(store.remove_file("f"), Err(Error::EmptyRing));
        assert_eq!(store.locate("f"), Err(Error::EmptyRing));
    }

    #[test]
    fn test_file_lands_on_located_node() {
        let store = store_abc();
        store.store_file("report.txt", "data").unwrap();
        let owner = store.locate("report.txt").unwrap();
        let node = store.ring().get_node(&owner).unwrap();
        assert_eq!(node.retrieve("report.txt").as_deref(), Some("data"));

        let holders = store
            .list_nodes()
            .iter()
            .filter(|n| n.contains_key("report.txt"))
            .count();
        assert_eq!(holders, 1);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let store = store_abc();
        assert_eq!(store.retrieve_file("nope").unwrap(), None);
        assert!(!store.contains_file("nope").unwrap());
        store.remove_file("nope").unwrap();
    }

    #[test]
    fn test_from_config() {
        let config = RingConfig {
            nodes: vec!["A".into(), "B".into()],
            ..RingConfig::default()
        };
        let store = FileStore::from_config(&config).unwrap();
        assert_eq!(store.node_count(), 2);
    }
}
