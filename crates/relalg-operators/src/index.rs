//! Primary index: composite key value -> row position in the tuple store.
//!
//! Rows are append-only, so a stored position stays valid for the life of
//! the table.

use std::collections::{BTreeMap, HashMap};

use relalg_core::config::IndexKind;
use relalg_core::types::Key;

#[derive(Debug, Clone)]
pub enum PrimaryIndex {
    Ordered(BTreeMap<Key, usize>),
    Hashed(HashMap<Key, usize>),
}

impl PrimaryIndex {
    pub fn new(kind: IndexKind) -> Self {
        match kind {
            IndexKind::Ordered => PrimaryIndex::Ordered(BTreeMap::new()),
            IndexKind::Hashed => PrimaryIndex::Hashed(HashMap::new()),
        }
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            PrimaryIndex::Ordered(_) => IndexKind::Ordered,
            PrimaryIndex::Hashed(_) => IndexKind::Hashed,
        }
    }

    pub fn get(&self, key: &Key) -> Option<usize> {
        match self {
            PrimaryIndex::Ordered(m) => m.get(key).copied(),
            PrimaryIndex::Hashed(m) => m.get(key).copied(),
        }
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }

    /// Point `key` at `row`, returning the row it previously pointed at.
    pub fn insert(&mut self, key: Key, row: usize) -> Option<usize> {
        match self {
            PrimaryIndex::Ordered(m) => m.insert(key, row),
            PrimaryIndex::Hashed(m) => m.insert(key, row),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PrimaryIndex::Ordered(m) => m.len(),
            PrimaryIndex::Hashed(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_previous_row() {
        for kind in [IndexKind::Ordered, IndexKind::Hashed] {
            let mut idx = PrimaryIndex::new(kind);
            assert_eq!(idx.kind(), kind);
            assert_eq!(idx.insert(Key::from(1), 0), None);
            assert_eq!(idx.insert(Key::from(2), 1), None);
            assert_eq!(idx.insert(Key::from(1), 2), Some(0));
            assert_eq!(idx.get(&Key::from(1)), Some(2));
            assert!(!idx.contains(&Key::from(3)));
            assert_eq!(idx.len(), 2);
        }
    }
}
