//! Position-keyed cache of search scores.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableEntry {
    pub depth: u8,
    pub score: i32,
}

/// What `put` does when the key is already present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// Newest result wins. Fine for a table cleared every move.
    Always,
    /// Keep the stored entry if it was searched deeper.
    DepthPreferred,
}

#[derive(Debug)]
pub struct TranspositionTable<K> {
    entries: HashMap<K, TableEntry>,
    replacement: Replacement,
    hits: u64,
}

impl<K: Eq + Hash> TranspositionTable<K> {
    pub fn new(replacement: Replacement) -> Self {
        Self {
            entries: HashMap::new(),
            replacement,
            hits: 0,
        }
    }

    /// The stored score, but only if it was searched at least `min_depth` deep.
    pub fn get(&mut self, key: &K, min_depth: u8) -> Option<i32> {
        let entry = self.entries.get(key)?;
        if entry.depth < min_depth {
            return None;
        }
        self.hits += 1;
        Some(entry.score)
    }

    pub fn put(&mut self, key: K, depth: u8, score: i32) {
        let entry = TableEntry { depth, score };
        match self.replacement {
            Replacement::Always => {
                self.entries.insert(key, entry);
            }
            Replacement::DepthPreferred => {
                self.entries
                    .entry(key)
                    .and_modify(|old| {
                        if depth >= old.depth {
                            *old = entry;
                        }
                    })
                    .or_insert(entry);
            }
        }
    }

    /// The stored entry whatever its depth, without counting a hit.
    pub fn probe(&self, key: &K) -> Option<TableEntry> {
        self.entries.get(key).copied()
    }

    /// Drop every entry and reset the hit counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Successful `get`s since the last `clear` or `reset_hits`.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Start a new hit count but keep the entries.
    pub fn reset_hits(&mut self) {
        self.hits = 0;
    }

    pub fn replacement(&self) -> Replacement {
        self.replacement
    }

    /// Applies to later `put`s; stored entries stay as they are.
    pub fn set_replacement(&mut self, replacement: Replacement) {
        self.replacement = replacement;
    }
}

#[cfg(test)]
#[path = "tt_tests.rs"]
mod tt_tests;
