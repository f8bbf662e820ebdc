//! BLAKE3 partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::Token;

/// Default partitioner: the first four bytes of the BLAKE3 digest read as a
/// big-endian word, then masked into the token space.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Partitioner;

impl Partitioner for Blake3Partitioner {
    fn token(&self, key: &[u8]) -> Token {
        let digest = ::blake3::hash(key);
        let bytes = digest.as_bytes();
        Token::from_word(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn name(&self) -> &'static str {
        "Blake3Partitioner"
    }
}
