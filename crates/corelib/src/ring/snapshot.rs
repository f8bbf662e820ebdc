//! Frozen ring placement and movement analysis.
//!
//! The store never migrates data when membership changes. A snapshot taken
//! before and after a change answers the question of how much data *would*
//! have to move.

use std::collections::BTreeMap;

use crate::partitioner::{AnyPartitioner, Partitioner};
use crate::token::Token;

/// A key whose owner differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub key: String,
    /// Owner before the change, `None` if the old ring was empty.
    pub from: Option<String>,
    /// Owner after the change, `None` if the new ring is empty.
    pub to: Option<String>,
}

/// Immutable copy of a ring's entries plus the partitioner that placed them.
#[derive(Debug, Clone)]
pub struct RingSnapshot<P: Partitioner = AnyPartitioner> {
    entries: BTreeMap<Token, String>,
    partitioner: P,
}

impl<P: Partitioner> RingSnapshot<P> {
    pub fn new(entries: BTreeMap<Token, String>, partitioner: P) -> Self {
        Self {
            entries,
            partitioner,
        }
    }

    /// Owner of `key` under this placement, `None` on an empty ring.
    pub fn owner(&self, key: &str) -> Option<&str> {
        let token = self.partitioner.token(key.as_bytes());
        self.entries
            .range(token..)
            .next()
            .or_else(|| self.entries.iter().next())
            .map(|(_, id)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<Token, String> {
        &self.entries
    }

    /// Keys from `keys` whose owner changed between `old` and `new`.
    pub fn diff<I, K>(old: &Self, new: &Self, keys: I) -> Vec<Movement>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|key| {
                let key = key.as_ref();
                let from = old.owner(key);
                let to = new.owner(key);
                (from != to).then(|| Movement {
                    key: key.to_owned(),
                    from: from.map(str::to_owned),
                    to: to.map(str::to_owned),
                })
            })
            .collect()
    }
}
