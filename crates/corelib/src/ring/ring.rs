//! Hash ring data structure.
//!
//! The ring is an ordered map from token to owning node, plus a membership
//! index from node id to node. Both live behind one lock so a reader never
//! sees a node that is indexed but not yet placed, or the reverse.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::node::Node;
use crate::partitioner::{AnyPartitioner, Partitioner};
use crate::ring::builder::RingBuilder;
use crate::ring::snapshot::RingSnapshot;
use crate::token::Token;
use crate::vnode::VirtualNode;

/// Virtual nodes per physical node unless configured otherwise.
pub const DEFAULT_VIRTUAL_NODES: usize = 3;

/// Consistent view of ring size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingStats {
    pub members: usize,
    pub entries: usize,
}

#[derive(Debug, Default)]
struct RingState {
    /// Token position -> owning node.
    entries: BTreeMap<Token, Arc<Node>>,
    /// Node id -> node. Source of truth for membership.
    members: HashMap<String, Arc<Node>>,
}

/// Consistent hash ring mapping keys to nodes.
///
/// Each member contributes `virtual_nodes` entries at
/// `token("{id}:{i}")`. A key belongs to the first entry clockwise from its
/// own token, wrapping past the end of the ring to the smallest entry.
///
/// # Collisions
///
/// When two virtual nodes land on the same token the later insertion wins and
/// the earlier owner silently loses that position. This skews the
/// distribution slightly and is left uncorrected; removal recomputes the
/// same tokens and deletes them regardless of their current owner.
///
/// # Thread Safety
///
/// All methods take `&self`. Membership changes hold the write lock for the
/// whole update and validate before mutating, so they either apply fully or
/// not at all.
#[derive(Debug)]
pub struct HashRing<P: Partitioner = AnyPartitioner> {
    state: RwLock<RingState>,
    partitioner: P,
    virtual_nodes: usize,
}

impl HashRing<AnyPartitioner> {
    /// Empty ring with the default partitioner and virtual-node count.
    pub fn new() -> Self {
        Self::empty(AnyPartitioner::default(), DEFAULT_VIRTUAL_NODES)
    }

    pub fn builder() -> RingBuilder<AnyPartitioner> {
        RingBuilder::new()
    }
}

impl Default for HashRing<AnyPartitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> HashRing<P> {
    /// Empty ring using `partitioner`, placing `virtual_nodes` entries per
    /// member.
    ///
    /// Fails with [`Error::InvalidArgument`] when `virtual_nodes` is zero:
    /// members would own no entries and every lookup would report an empty
    /// ring.
    pub fn with_partitioner(partitioner: P, virtual_nodes: usize) -> Result<Self> {
        if virtual_nodes == 0 {
            return Err(Error::InvalidArgument(
                "virtual_nodes must be at least 1".into(),
            ));
        }
        Ok(Self::empty(partitioner, virtual_nodes))
    }

    fn empty(partitioner: P, virtual_nodes: usize) -> Self {
        Self {
            state: RwLock::new(RingState::default()),
            partitioner,
            virtual_nodes,
        }
    }

    /// Add `node` to the ring.
    ///
    /// Fails with [`Error::AlreadyExists`] if a member already has this id,
    /// in which case the ring is unchanged.
    pub fn add_node(&self, node: impl Into<Arc<Node>>) -> Result<Arc<Node>> {
        let node = node.into();
        let tokens = self.tokens_for(node.id());

        let mut state = self.state.write();
        if state.members.contains_key(node.id()) {
            return Err(Error::AlreadyExists(node.id().to_owned()));
        }

        for token in tokens {
            if let Some(previous) = state.entries.insert(token, Arc::clone(&node)) {
                warn!(
                    %token,
                    node_id = node.id(),
                    previous = previous.id(),
                    "virtual node collision, ring entry overwritten"
                );
            }
        }
        state.members.insert(node.id().to_owned(), Arc::clone(&node));

        Self::record_gauges(&state);
        debug!(node_id = node.id(), virtual_nodes = self.virtual_nodes, "added node to ring");
        Ok(node)
    }

    /// Remove the member with `node_id` and all of its ring entries.
    ///
    /// The removed node keeps its entries, but nothing in the ring points at
    /// it any more: data stored there is no longer reachable through the
    /// ring and is not moved anywhere. Fails with [`Error::NotFound`] if no
    /// member has this id.
    pub fn remove_node(&self, node_id: &str) -> Result<Arc<Node>> {
        let tokens = self.tokens_for(node_id);

        let mut state = self.state.write();
        let node = state
            .members
            .remove(node_id)
            .ok_or_else(|| Error::NotFound(node_id.to_owned()))?;

        for token in &tokens {
            state.entries.remove(token);
        }

        Self::record_gauges(&state);
        debug!(node_id, orphaned_entries = node.len(), "removed node from ring");
        Ok(node)
    }

    /// Find the node that owns `key`.
    ///
    /// Fails with [`Error::EmptyRing`] if the ring has no entries.
    pub fn resolve(&self, key: &str) -> Result<Arc<Node>> {
        let token = self.partitioner.token(key.as_bytes());
        let state = self.state.read();
        metrics::counter!("ringstore_ring_lookups_total").increment(1);
        Self::successor(&state.entries, token)
            .map(Arc::clone)
            .ok_or(Error::EmptyRing)
    }

    /// Clockwise successor of `token`: the first entry at or after it,
    /// wrapping to the smallest entry.
    fn successor(entries: &BTreeMap<Token, Arc<Node>>, token: Token) -> Option<&Arc<Node>> {
        entries
            .range(token..)
            .next()
            .or_else(|| entries.iter().next())
            .map(|(_, node)| node)
    }

    fn tokens_for(&self, node_id: &str) -> Vec<Token> {
        (0..self.virtual_nodes)
            .map(|i| VirtualNode::from_index(&self.partitioner, node_id, i).token())
            .collect()
    }

    fn record_gauges(state: &RingState) {
        metrics::gauge!("ringstore_ring_members").set(state.members.len() as f64);
        metrics::gauge!("ringstore_ring_entries").set(state.entries.len() as f64);
    }

    /// Snapshot of current members, in no particular order.
    pub fn nodes(&self) -> Vec<Arc<Node>> {
        self.state.read().members.values().cloned().collect()
    }

    pub fn get_node(&self, node_id: &str) -> Option<Arc<Node>> {
        self.state.read().members.get(node_id).cloned()
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.state.read().members.contains_key(node_id)
    }

    pub fn node_count(&self) -> usize {
        self.state.read().members.len()
    }

    /// Number of ring entries. Equals `node_count() * virtual_nodes()` unless
    /// virtual nodes collided.
    pub fn entry_count(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Member and entry counts read under a single lock.
    pub fn stats(&self) -> RingStats {
        let state = self.state.read();
        RingStats {
            members: state.members.len(),
            entries: state.entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    pub fn virtual_nodes(&self) -> usize {
        self.virtual_nodes
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }

    /// Ring entries in clockwise (token) order.
    pub fn entries(&self) -> Vec<VirtualNode> {
        self.state
            .read()
            .entries
            .iter()
            .map(|(token, node)| VirtualNode::new(*token, node.id()))
            .collect()
    }

    /// Immutable copy of the ring's placement, for offline analysis.
    pub fn snapshot(&self) -> RingSnapshot<P>
    where
        P: Clone,
    {
        let entries = self
            .state
            .read()
            .entries
            .iter()
            .map(|(token, node)| (*token, node.id().to_owned()))
            .collect();
        RingSnapshot::new(entries, self.partitioner.clone())
    }

    /// Fraction of the hash circle owned by each member, sorted by id.
    ///
    /// A member owns the arc ending at each of its entries, starting just
    /// after the previous entry. Fractions sum to 1.0 on a non-empty ring.
    pub fn ownership(&self) -> Vec<(String, f64)> {
        let state = self.state.read();
        let mut owned: HashMap<&str, u64> = state
            .members
            .keys()
            .map(|id| (id.as_str(), 0u64))
            .collect();

        if state.entries.len() == 1 {
            if let Some(node) = state.entries.values().next() {
                owned.insert(node.id(), Token::SPACE);
            }
        } else if let Some((last, _)) = state.entries.iter().next_back() {
            let mut previous = *last;
            for (token, node) in &state.entries {
                *owned.entry(node.id()).or_default() += previous.distance_to(token);
                previous = *token;
            }
        }

        let mut shares: Vec<(String, f64)> = owned
            .into_iter()
            .map(|(id, arc)| (id.to_owned(), arc as f64 / Token::SPACE as f64))
            .collect();
        shares.sort_by(|a, b| a.0.cmp(&b.0));
        shares
    }
}
