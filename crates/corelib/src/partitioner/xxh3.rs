//! XXH3 partitioner.

use xxhash_rust::xxh3::xxh3_64;

use crate::partitioner::traits::Partitioner;
use crate::token::Token;

/// Non-cryptographic partitioner using the low word of XXH3-64.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner;

impl Partitioner for Xxh3Partitioner {
    fn token(&self, key: &[u8]) -> Token {
        Token::from_word(xxh3_64(key) as u32)
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}
