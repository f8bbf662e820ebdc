//! Ring positions.
//!
//! A token is a point on the `[0, 2^31)` hash circle. Every partitioner folds
//! its digest into this space, so tokens produced by different digests are
//! comparable in shape even though they never share a ring.

use std::fmt;

/// Position on the hash ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Token(pub u32);

impl Token {
    /// Mask applied to raw digest words to keep tokens non-negative.
    pub const MASK: u32 = 0x7FFF_FFFF;

    /// Smallest token (start of the ring).
    pub const MIN: Token = Token(0);

    /// Largest token (end of the ring).
    pub const MAX: Token = Token(Self::MASK);

    /// Number of distinct positions on the ring.
    pub const SPACE: u64 = Self::MASK as u64 + 1;

    /// Fold an arbitrary 32-bit word into the token space.
    #[inline]
    pub fn from_word(word: u32) -> Self {
        Token(word & Self::MASK)
    }

    /// Raw numeric value.
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Clockwise distance from `self` to `other` on the ring.
    ///
    /// The distance from a token to itself is zero.
    pub fn distance_to(&self, other: &Self) -> u64 {
        let from = u64::from(self.0);
        let to = u64::from(other.0);
        if to >= from {
            to - from
        } else {
            Self::SPACE - from + to
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
