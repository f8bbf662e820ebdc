//! Builder for [`HashRing`].

use crate::config::RingConfig;
use crate::error::Result;
use crate::node::Node;
use crate::partitioner::{AnyPartitioner, Partitioner};
use crate::ring::ring::{HashRing, DEFAULT_VIRTUAL_NODES};

/// Configures and populates a ring in one expression.
///
/// ```rust
/// use ringstore_core::{Node, RingBuilder};
///
/// let ring = RingBuilder::new()
///     .with_virtual_nodes(8)
///     .add_node(Node::new("A"))
///     .add_node(Node::new("B"))
///     .build()
///     .unwrap();
/// assert_eq!(ring.entry_count(), 16);
/// ```
#[derive(Debug)]
pub struct RingBuilder<P: Partitioner = AnyPartitioner> {
    partitioner: P,
    virtual_nodes: usize,
    nodes: Vec<Node>,
}

impl RingBuilder<AnyPartitioner> {
    pub fn new() -> Self {
        Self {
            partitioner: AnyPartitioner::default(),
            virtual_nodes: DEFAULT_VIRTUAL_NODES,
            nodes: Vec::new(),
        }
    }

    /// Builder seeded from a configuration document: digest, virtual-node
    /// count and initial members.
    pub fn from_config(config: &RingConfig) -> Self {
        config
            .nodes
            .iter()
            .fold(
                Self::new()
                    .with_partitioner(AnyPartitioner::from(config.digest))
                    .with_virtual_nodes(config.virtual_nodes),
                |builder, id| builder.add_node(Node::new(id.as_str())),
            )
    }
}

impl Default for RingBuilder<AnyPartitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> RingBuilder<P> {
    pub fn with_virtual_nodes(mut self, virtual_nodes: usize) -> Self {
        self.virtual_nodes = virtual_nodes;
        self
    }

    pub fn with_partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<Q> {
        RingBuilder {
            partitioner,
            virtual_nodes: self.virtual_nodes,
            nodes: self.nodes,
        }
    }

    pub fn add_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Build the ring, adding nodes in insertion order.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) for a zero virtual-node count and
    /// with [`Error::AlreadyExists`](crate::Error::AlreadyExists) if two queued nodes share an id.
    pub fn build(self) -> Result<HashRing<P>> {
        let ring = HashRing::with_partitioner(self.partitioner, self.virtual_nodes)?;
        for node in self.nodes {
            ring.add_node(node)?;
        }
        Ok(ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::partitioner::{DigestKind, Xxh3Partitioner};

    #[test]
    fn test_builder_default() {
        let ring = RingBuilder::new()
            .add_node(Node::new("A"))
            .add_node(Node::new("B"))
            .build()
            .unwrap();
        assert_eq!(ring.node_count(), 2);
        assert_eq!(ring.virtual_nodes(), 3);
        assert_eq!(ring.entry_count(), 6);
        assert_eq!(ring.partitioner_name(), "Blake3Partitioner");
    }

    #[test]
    fn test_builder_custom_partitioner() {
        let ring = RingBuilder::new()
            .with_partitioner(Xxh3Partitioner)
            .add_node(Node::new("A"))
            .build()
            .unwrap();
        assert_eq!(ring.partitioner_name(), "Xxh3Partitioner");
    }

    #[test]
    fn test_builder_rejects_zero_vnodes() {
        let err = RingBuilder::new().with_virtual_nodes(0).build().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let err = RingBuilder::new()
            .add_node(Node::new("A"))
            .add_node(Node::new("A"))
            .build()
            .unwrap_err();
        assert_eq!(err, Error::AlreadyExists("A".into()));
    }

    #[test]
    fn test_builder_from_config() {
        let config = RingConfig {
            virtual_nodes: 5,
            digest: DigestKind::Sip,
            nodes: vec!["A".into(), "B".into()],
        };
        let ring = RingBuilder::from_config(&config).build().unwrap();
        assert_eq!(ring.entry_count(), 10);
        assert_eq!(ring.partitioner_name(), "SipPartitioner");
    }
}
