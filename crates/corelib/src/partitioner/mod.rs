//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys into tokens
//! that can be placed on the hash ring. [`DigestKind`] names them for
//! configuration, and [`AnyPartitioner`] dispatches to whichever was chosen
//! at runtime.

pub mod blake3;
pub mod sip;
pub mod traits;
pub mod xxh3;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use self::blake3::Blake3Partitioner;
pub use self::sip::SipPartitioner;
pub use self::traits::Partitioner;
pub use self::xxh3::Xxh3Partitioner;

use crate::error::Error;
use crate::token::Token;

/// Digest selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    #[default]
    Blake3,
    Xxh3,
    Sip,
}

impl DigestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestKind::Blake3 => "blake3",
            DigestKind::Xxh3 => "xxh3",
            DigestKind::Sip => "sip",
        }
    }
}

impl fmt::Display for DigestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(DigestKind::Blake3),
            "xxh3" => Ok(DigestKind::Xxh3),
            "sip" | "siphash" => Ok(DigestKind::Sip),
            other => Err(Error::InvalidArgument(format!("unknown digest: {other}"))),
        }
    }
}

/// Runtime-selected partitioner.
#[derive(Clone, Copy, Debug)]
pub enum AnyPartitioner {
    Blake3(Blake3Partitioner),
    Xxh3(Xxh3Partitioner),
    Sip(SipPartitioner),
}

impl Default for AnyPartitioner {
    fn default() -> Self {
        DigestKind::default().into()
    }
}

impl From<DigestKind> for AnyPartitioner {
    fn from(kind: DigestKind) -> Self {
        match kind {
            DigestKind::Blake3 => AnyPartitioner::Blake3(Blake3Partitioner),
            DigestKind::Xxh3 => AnyPartitioner::Xxh3(Xxh3Partitioner),
            DigestKind::Sip => AnyPartitioner::Sip(SipPartitioner),
        }
    }
}

impl Partitioner for AnyPartitioner {
    fn token(&self, key: &[u8]) -> Token {
        match self {
            AnyPartitioner::Blake3(p) => p.token(key),
            AnyPartitioner::Xxh3(p) => p.token(key),
            AnyPartitioner::Sip(p) => p.token(key),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AnyPartitioner::Blake3(p) => p.name(),
            AnyPartitioner::Xxh3(p) => p.name(),
            AnyPartitioner::Sip(p) => p.name(),
        }
    }
}
