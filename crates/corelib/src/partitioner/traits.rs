//! Core partitioner trait definitions.

use crate::token::Token;

/// A partitioner converts keys into tokens for placement on the hash ring.
///
/// Partitioners are stateless and thread-safe, allowing concurrent
/// token generation without synchronization overhead. Implementations must be
/// deterministic across processes and platforms: ring placement is recomputed
/// on removal, so a partitioner that drifts would strand ring entries.
pub trait Partitioner: Send + Sync + 'static {
    /// Converts a key into a token in `[Token::MIN, Token::MAX]`.
    fn token(&self, key: &[u8]) -> Token;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
