//! Virtual node abstractions.
//!
//! Each physical node is placed on the ring several times, once per virtual
//! index, at `token("{node_id}:{index}")`. More positions smooth out the
//! distribution; the ring's default of three is small and favours a compact
//! ring over evenness.
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(v) entries per node, v = virtual nodes per node
//! - **Lookup**: O(log n) where n = total ring entries
//! - **Rebalancing**: roughly k/N keys change owner when one of N nodes
//!   leaves (k = total keys)

use std::fmt;

use crate::digest::virtual_node_token;
use crate::partitioner::Partitioner;
use crate::token::Token;

/// A single ring entry: a token position and the physical node owning it.
///
/// Ordered by token first, so a sorted `Vec<VirtualNode>` reads clockwise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Token position on the ring.
    pub token: Token,

    /// The physical node that owns this virtual node.
    pub node_id: String,
}

impl VirtualNode {
    #[inline]
    pub fn new(token: Token, node_id: impl Into<String>) -> Self {
        Self {
            token,
            node_id: node_id.into(),
        }
    }

    /// Place virtual node `vnode_index` of `node_id` using `partitioner`.
    pub fn from_index<P: Partitioner + ?Sized>(
        partitioner: &P,
        node_id: &str,
        vnode_index: usize,
    ) -> Self {
        Self::new(virtual_node_token(partitioner, node_id, vnode_index), node_id)
    }

    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    #[inline]
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(token={}, node={})", self.token, self.node_id)
    }
}
