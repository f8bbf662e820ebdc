//! Key digests.
//!
//! Deterministic mapping from strings to non-negative 32-bit integers, plus
//! the fixed derivation used to place virtual nodes. The free functions use
//! the default [`Blake3Partitioner`]; the `_with` variants accept any
//! [`Partitioner`].
//!
//! Virtual-node keys are always formatted as `"{node_id}:{virtual_index}"`.
//! Changing this format moves every virtual node on every ring.

use crate::error::{Error, Result};
use crate::partitioner::{Blake3Partitioner, Partitioner};
use crate::token::Token;

/// Separator between a node id and its virtual index.
pub const VIRTUAL_NODE_DELIMITER: char = ':';

/// Hash `input` into `[0, 2^31 - 1]`.
pub fn hash(input: &str) -> u32 {
    hash_with(&Blake3Partitioner, input)
}

/// Hash `input` into `[0, range)`.
///
/// Fails with [`Error::InvalidArgument`] when `range <= 0`.
pub fn hash_in_range(input: &str, range: i64) -> Result<u32> {
    hash_in_range_with(&Blake3Partitioner, input, range)
}

/// Ring position of virtual node `virtual_index` of `node_id`.
pub fn hash_virtual_node(node_id: &str, virtual_index: usize) -> u32 {
    virtual_node_token(&Blake3Partitioner, node_id, virtual_index).value()
}

/// The string hashed to place a virtual node.
pub fn virtual_node_key(node_id: &str, virtual_index: usize) -> String {
    format!("{node_id}{VIRTUAL_NODE_DELIMITER}{virtual_index}")
}

pub fn hash_with<P: Partitioner + ?Sized>(partitioner: &P, input: &str) -> u32 {
    partitioner.token(input.as_bytes()).value()
}

pub fn hash_in_range_with<P: Partitioner + ?Sized>(
    partitioner: &P,
    input: &str,
    range: i64,
) -> Result<u32> {
    if range <= 0 {
        return Err(Error::InvalidArgument(format!(
            "range must be positive, got {range}"
        )));
    }
    let h = u64::from(hash_with(partitioner, input));
    // h < 2^31, so the remainder always fits.
    Ok((h % range as u64) as u32)
}

pub fn virtual_node_token<P: Partitioner + ?Sized>(
    partitioner: &P,
    node_id: &str,
    virtual_index: usize,
) -> Token {
    partitioner.token(virtual_node_key(node_id, virtual_index).as_bytes())
}
