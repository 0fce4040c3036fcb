use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::ops::Bound::{Excluded, Included, Unbounded};

use crate::error::{OperationError, Result};

/// A composite curve position with a total order, usable as a map key.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub f64);

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Symmetric map between the two positions of every crossing.
///
/// Both encodings of a crossing are inserted together. Keys are removed
/// one at a time as a traversal arrives at them, so a finished traversal
/// leaves the map empty.
#[derive(Debug)]
pub struct TwinMap<K> {
    map: BTreeMap<K, K>,
}

impl<K: Ord + Copy + Debug> TwinMap<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Inserts `a → b` and `b → a`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::UnresolvedCrossing` if either position is
    /// already mapped (several crossings at one position).
    pub fn insert_pair(&mut self, a: K, b: K) -> Result<()> {
        if a == b || self.map.contains_key(&a) || self.map.contains_key(&b) {
            return Err(OperationError::UnresolvedCrossing(format!(
                "crossing position {a:?} / {b:?} is already mapped"
            ))
            .into());
        }
        self.map.insert(a, b);
        self.map.insert(b, a);
        Ok(())
    }

    /// Inserts `from → to` alone, leaving `to` unmapped.
    #[cfg(test)]
    pub(crate) fn insert_one(&mut self, from: K, to: K) {
        self.map.insert(from, to);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub fn first_key(&self) -> Option<K> {
        self.map.keys().next().copied()
    }

    #[must_use]
    pub fn twin(&self, key: &K) -> Option<K> {
        self.map.get(key).copied()
    }

    /// Smallest key strictly greater than `key`.
    #[must_use]
    pub fn next_after(&self, key: &K) -> Option<K> {
        self.map
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(k, _)| *k)
    }

    /// Smallest key greater than or equal to `key`.
    #[must_use]
    pub fn first_from(&self, key: &K) -> Option<K> {
        self.map
            .range((Included(key), Unbounded))
            .next()
            .map(|(k, _)| *k)
    }

    /// Removes `key`, returning its twin.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::UnresolvedCrossing` if `key` was not mapped.
    pub fn take(&mut self, key: &K) -> Result<K> {
        self.map.remove(key).ok_or_else(|| {
            OperationError::UnresolvedCrossing(format!("crossing {key:?} was already consumed"))
                .into()
        })
    }
}

impl<K: Ord + Copy + Debug> Default for TwinMap<K> {
    fn default() -> Self {
        Self::new()
    }
}
