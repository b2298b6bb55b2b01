//! Uncompressed per-level trie builder.
//!
//! Keys arrive one at a time in strictly ascending byte-lexicographic order,
//! so each new key shares a (possibly empty) prefix with the previous one and
//! only diverges once. That lets every insertion append to the right edge of
//! the trie: reopen one sibling run at the divergence depth, then grow a
//! single-child chain for the remaining suffix.
//!
//! Each depth keeps its own [`Level`]: a LOUDS bit sequence (a run of 0s per
//! child, terminated by a 1), a terminal-marker bit per node, and one label
//! byte per node. The levels are consumed by the breadth-first compaction in
//! [`crate::patricia`], which needs rank/select only on the LOUDS sequences.

use crate::bitvec::BitVector;
use crate::error::{Error, Result};

/// Per-depth bundle of LOUDS bits, terminal markers and edge labels.
#[derive(Default)]
pub(crate) struct Level {
    /// Child runs of the previous depth's nodes, in left-to-right order.
    pub(crate) louds: BitVector,
    /// One bit per node at this depth: 1 iff a key ends here.
    pub(crate) outs: BitVector,
    /// One byte per node at this depth: the label on its incoming edge.
    pub(crate) labels: Vec<u8>,
}

impl Level {
    fn new() -> Self {
        Self::default()
    }

    fn heap_bytes(&self) -> usize {
        self.louds.heap_bytes() + self.outs.heap_bytes() + self.labels.len()
    }
}

/// A full (non-compacted) trie built by incremental sorted insertion.
pub struct Trie {
    pub(crate) levels: Vec<Level>,
    last_key: Vec<u8>,
    n_keys: usize,
    n_nodes: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Create a trie holding only the root.
    ///
    /// Level 0 is seeded with the super-root encoding ("01"), a non-terminal
    /// root and a sentinel label; level 1 starts with the root's (still
    /// empty) child run already terminated.
    pub fn new() -> Self {
        let mut levels = vec![Level::new(), Level::new()];
        levels[0].louds.add(false);
        levels[0].louds.add(true);
        levels[1].louds.add(true);
        levels[0].outs.add(false);
        levels[0].labels.push(b' ');
        Self {
            levels,
            last_key: Vec::new(),
            n_keys: 0,
            n_nodes: 1,
        }
    }

    /// Add a key, which must be strictly greater than the previous one.
    ///
    /// Returns [`Error::OrderViolation`] (leaving the trie untouched) when it
    /// is not. The empty key is only orderable as the very first insertion.
    pub fn add(&mut self, key: &[u8]) -> Result<()> {
        if self.n_keys > 0 && key <= self.last_key.as_slice() {
            return Err(Error::OrderViolation {
                n_keys: self.n_keys,
            });
        }
        if key.is_empty() {
            self.levels[0].outs.set(0, true);
            self.n_keys += 1;
            return Ok(());
        }
        while self.levels.len() < key.len() + 2 {
            self.levels.push(Level::new());
        }

        // Find the divergence depth against the previous key. Strict ordering
        // guarantees a divergence before the key runs out: either the key
        // extends the previous one (i == last_key.len()) or some byte differs
        // from the most recent sibling's label at that depth.
        let mut i = 0;
        loop {
            let byte = key[i];
            if i == self.last_key.len() || byte != *self.levels[i + 1].labels.last().unwrap() {
                // Reopen the sibling run: the trailing terminator becomes the
                // new node's child bit, and a fresh terminator closes the run.
                let level = &mut self.levels[i + 1];
                let end = level.louds.len() - 1;
                level.louds.set(end, false);
                level.louds.add(true);
                level.outs.add(false);
                level.labels.push(byte);
                self.n_nodes += 1;
                break;
            }
            i += 1;
        }

        // Each remaining suffix byte becomes a fresh single-child chain node.
        i += 1;
        while i < key.len() {
            let level = &mut self.levels[i + 1];
            level.louds.add(false);
            level.louds.add(true);
            level.outs.add(false);
            level.labels.push(key[i]);
            self.n_nodes += 1;
            i += 1;
        }

        // Terminate the deepest node's (empty) child run and mark it terminal.
        self.levels[i + 1].louds.add(true);
        let deepest = &mut self.levels[i];
        let end = deepest.outs.len() - 1;
        deepest.outs.set(end, true);

        self.last_key.clear();
        self.last_key.extend_from_slice(key);
        self.n_keys += 1;
        Ok(())
    }

    /// Finalize every level's LOUDS index.
    ///
    /// Terminal markers and labels are read by position during compaction and
    /// need no index of their own.
    pub fn build(&mut self) {
        for level in &mut self.levels {
            level.louds.build();
        }
    }

    /// Number of keys added so far.
    pub fn n_keys(&self) -> usize {
        self.n_keys
    }

    /// Number of trie nodes, the root included.
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Approximate heap memory usage of all levels in bytes.
    pub fn heap_bytes(&self) -> usize {
        self.levels.iter().map(Level::heap_bytes).sum()
    }
}
