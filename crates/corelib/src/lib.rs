//! Client-side consistent hashing for sharding keyed data across named
//! storage nodes.
//!
//! This crate provides:
//! - Deterministic digests and pluggable partitioners
//! - Storage nodes with a swappable backend
//! - The hash ring: virtual-node placement, lookup and membership
//! - A file-level facade that routes each operation to its owning node
//!
//! Membership changes never relocate data. A node that leaves the ring takes
//! its files with it.

pub mod config;
pub mod digest;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod store;
pub mod token;
pub mod vnode;

pub use config::RingConfig;
pub use digest::{hash, hash_in_range, hash_virtual_node};
pub use error::{Error, Result};
pub use node::{MemoryBackend, Node, StorageBackend};
pub use partitioner::{AnyPartitioner, DigestKind, Partitioner};
pub use ring::{HashRing, Movement, Ring, RingBuilder, RingSnapshot, RingStats};
pub use store::FileStore;
pub use token::Token;
pub use vnode::VirtualNode;
