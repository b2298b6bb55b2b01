//! Flattened LOUDS-Patricia trie: breadth-first compaction and lookup.
//!
//! [`Patricia`] accumulates sorted keys in an uncompressed [`Trie`], then a
//! one-shot [`Patricia::build`] flattens it into a single breadth-first node
//! id space. Unary chains of non-terminal, single-child nodes are collapsed
//! into raw byte runs ("tails"), eliminating per-character nodes for long
//! unshared suffixes — the Patricia half of the name.
//!
//! The flattened structure is five parallel sequences, one entry per node:
//! a shared LOUDS bit sequence encoding every node's child count, a terminal
//! marker, a link marker (1 iff the node's edge continues into a tail run),
//! the first label byte, and the tail store (`tail_bytes` plus a bit sequence
//! whose set bits mark run starts, so runs are delimited via rank/select).
//!
//! A key's ordinal is the number of terminal nodes preceding it in
//! breadth-first order. The numbering is an emergent property of that order,
//! not pure lexicographic rank, and lookups reproduce it exactly.

use std::collections::VecDeque;

use crate::bitvec::BitVector;
use crate::error::Result;
use crate::trie::Trie;

/// Work item for the breadth-first compaction queue.
///
/// `Leaf` is a placeholder for a node with no children: it keeps queue pops
/// and LOUDS closing bits in one-to-one correspondence without a magic
/// coordinate pair.
enum WorkItem {
    /// A node whose children are pending enumeration, identified by its trie
    /// level and its position within that level's LOUDS sequence.
    Node { level: usize, pos: usize },
    /// A node known to have no children.
    Leaf,
}

/// A succinct ordered-string index over keys added in ascending order.
///
/// # Example
///
/// ```
/// use strie::Patricia;
///
/// let mut index = Patricia::new();
/// index.add(b"car").unwrap();
/// index.add(b"cat").unwrap();
/// index.add(b"dog").unwrap();
/// index.build();
///
/// assert!(index.lookup(b"cat").is_some());
/// assert_eq!(index.lookup(b"cow"), None);
/// assert_eq!(index.n_keys(), 3);
/// ```
pub struct Patricia {
    trie: Trie,
    louds: BitVector,
    outs: BitVector,
    links: BitVector,
    labels: Vec<u8>,
    tail_bits: BitVector,
    tail_bytes: Vec<u8>,
    n_keys: usize,
}

impl Default for Patricia {
    fn default() -> Self {
        Self::new()
    }
}

impl Patricia {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            louds: BitVector::new(),
            outs: BitVector::new(),
            links: BitVector::new(),
            labels: Vec::new(),
            tail_bits: BitVector::new(),
            tail_bytes: Vec::new(),
            n_keys: 0,
        }
    }

    /// Add a key, which must be strictly greater than the previous one.
    ///
    /// Returns [`crate::Error::OrderViolation`] otherwise, leaving the index
    /// untouched. Must not be called after [`build`](Self::build).
    pub fn add(&mut self, key: &[u8]) -> Result<()> {
        self.trie.add(key)
    }

    /// Flatten the accumulated trie and finalize all rank/select indexes.
    ///
    /// One-shot: call exactly once, after all [`add`](Self::add)s and before
    /// any [`lookup`](Self::lookup). The uncompressed trie is discarded when
    /// this returns; queries touch only the flattened sequences.
    pub fn build(&mut self) {
        self.trie.build();
        self.n_keys = self.trie.n_keys();

        // Node 0 (the root) is seeded manually: the leading "01" is the
        // super-root's child run.
        self.louds.add(false);
        self.louds.add(true);
        self.outs.add(self.trie.levels[0].outs.get(0));
        self.links.add(false);
        self.labels.push(b' ');

        let mut queue: VecDeque<WorkItem> = VecDeque::new();
        if !self.trie.levels[1].louds.get(0) {
            queue.push_back(WorkItem::Node { level: 1, pos: 0 });
        } else {
            queue.push_back(WorkItem::Leaf);
        }

        while let Some(item) = queue.pop_front() {
            if let WorkItem::Node { level, mut pos } = item {
                while !self.trie.levels[level].louds.get(pos) {
                    self.louds.add(false);
                    let mut level_id = level;
                    // LOUDS position -> index within the level.
                    let mut node_id = pos - self.trie.levels[level_id].louds.rank(pos);
                    self.labels.push(self.trie.levels[level_id].labels[node_id]);

                    // Tail walk: descend while the reached node is not
                    // terminal and the next level shows exactly one child.
                    // This exact stopping condition fixes the node count and
                    // compressed size; do not simplify it.
                    let mut node_pos;
                    loop {
                        node_pos = if node_id == 0 {
                            0
                        } else {
                            self.trie.levels[level_id + 1].louds.select(node_id - 1) + 1
                        };
                        if self.trie.levels[level_id].outs.get(node_id)
                            || !self.trie.levels[level_id + 1].louds.get(node_pos + 1)
                        {
                            break;
                        }
                        node_id = node_pos - node_id;
                        // Run-start marker on the first appended byte only.
                        self.tail_bits.add(level_id == level);
                        level_id += 1;
                        self.tail_bytes
                            .push(self.trie.levels[level_id].labels[node_id]);
                    }

                    if !self.trie.levels[level_id + 1].louds.get(node_pos) {
                        queue.push_back(WorkItem::Node {
                            level: level_id + 1,
                            pos: node_pos,
                        });
                    } else {
                        queue.push_back(WorkItem::Leaf);
                    }
                    self.links.add(level_id > level);
                    self.outs.add(self.trie.levels[level_id].outs.get(node_id));
                    pos += 1;
                }
            }
            // One closing bit per dequeued item, Leaf placeholders included.
            self.louds.add(true);
        }

        self.louds.build();
        self.outs.build();
        self.links.build();
        self.tail_bits.add(true);
        self.tail_bits.build();

        // The uncompressed trie is no longer required.
        self.trie = Trie::new();
    }

    /// Search for `query` and return its ordinal in `[0, n_keys)`, or `None`
    /// if the key was never added.
    ///
    /// Only valid after [`build`](Self::build). Repeated lookups of the same
    /// key always return the same ordinal.
    pub fn lookup(&self, query: &[u8]) -> Option<usize> {
        let mut node_id: usize = 0;
        let mut i = 0;
        while i < query.len() {
            let node_pos = self.louds.select(node_id) + 1;
            let run_end = self.louds.next_one(node_pos);
            // LOUDS position -> node id for both run boundaries.
            let begin = node_pos - node_id - 1;
            let end = begin + (run_end - node_pos);

            // Siblings are label-sorted because keys arrived in sorted order.
            let byte = query[i];
            let mut lo = begin;
            let mut hi = end;
            let mut matched = false;
            while lo < hi {
                node_id = (lo + hi) / 2;
                match byte.cmp(&self.labels[node_id]) {
                    std::cmp::Ordering::Less => hi = node_id,
                    std::cmp::Ordering::Greater => lo = node_id + 1,
                    std::cmp::Ordering::Equal => {
                        if self.links.get(node_id) {
                            // The edge continues into a tail run: every byte
                            // must match, and the query must cover the run.
                            let mut tail_pos =
                                self.tail_bits.select(self.links.rank(node_id));
                            i += 1;
                            loop {
                                if i == query.len() {
                                    return None;
                                }
                                if self.tail_bytes[tail_pos] != query[i] {
                                    return None;
                                }
                                tail_pos += 1;
                                if self.tail_bits.get(tail_pos) {
                                    break;
                                }
                                i += 1;
                            }
                        }
                        matched = true;
                        break;
                    }
                }
            }
            if !matched {
                return None;
            }
            i += 1;
        }
        if !self.outs.get(node_id) {
            return None;
        }
        Some(self.outs.rank(node_id))
    }

    /// Number of keys added.
    pub fn n_keys(&self) -> usize {
        self.n_keys
    }

    /// Number of nodes in the flattened trie. Only valid after
    /// [`build`](Self::build).
    pub fn n_nodes(&self) -> usize {
        self.outs.len()
    }

    /// Approximate total bytes occupied by the flattened sequences and their
    /// rank/select indexes. Diagnostic, not exact.
    pub fn size(&self) -> usize {
        self.louds.heap_bytes()
            + self.outs.heap_bytes()
            + self.links.heap_bytes()
            + self.labels.len()
            + self.tail_bits.heap_bytes()
            + self.tail_bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_index(keys: &[&[u8]]) -> Patricia {
        let mut index = Patricia::new();
        for key in keys {
            index.add(key).unwrap();
        }
        index.build();
        index
    }

    #[test]
    fn test_car_cat_dog() {
        let keys: &[&[u8]] = &[b"car", b"cat", b"dog"];
        let index = build_index(keys);
        assert_eq!(index.n_keys(), 3);

        let mut ordinals: Vec<usize> =
            keys.iter().map(|k| index.lookup(k).unwrap()).collect();
        ordinals.sort_unstable();
        assert_eq!(ordinals, vec![0, 1, 2]);

        assert_eq!(index.lookup(b"c"), None);
        assert_eq!(index.lookup(b"ca"), None);
        assert_eq!(index.lookup(b"cars"), None);
        assert_eq!(index.lookup(b"cow"), None);
        assert_eq!(index.lookup(b"do"), None);
        assert_eq!(index.lookup(b""), None);
    }

    #[test]
    fn test_empty_key() {
        let index = build_index(&[b""]);
        assert_eq!(index.lookup(b""), Some(0));
        assert_eq!(index.lookup(b"a"), None);
        assert_eq!(index.n_keys(), 1);
        assert_eq!(index.n_nodes(), 1);
    }

    #[test]
    fn test_empty_key_among_others() {
        let keys: &[&[u8]] = &[b"", b"a", b"ab"];
        let index = build_index(keys);
        let mut seen: Vec<usize> =
            keys.iter().map(|k| index.lookup(k).unwrap()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_index() {
        let index = build_index(&[]);
        assert_eq!(index.n_keys(), 0);
        assert_eq!(index.lookup(b""), None);
        assert_eq!(index.lookup(b"a"), None);
    }

    #[test]
    fn test_tail_compression_boundaries() {
        // "internationalization" forces a long tail; the shorter keys break
        // it at terminal nodes and branch points.
        let keys: &[&[u8]] = &[b"in", b"inter", b"internationalization", b"interned"];
        let index = build_index(keys);
        let mut ordinals: Vec<usize> =
            keys.iter().map(|k| index.lookup(k).unwrap()).collect();
        ordinals.sort_unstable();
        assert_eq!(ordinals, (0..keys.len()).collect::<Vec<_>>());

        // Probes that die inside or at the edge of a tail run.
        assert_eq!(index.lookup(b"int"), None);
        assert_eq!(index.lookup(b"interm"), None);
        assert_eq!(index.lookup(b"internationalizatio"), None);
        assert_eq!(index.lookup(b"internationalizations"), None);
        assert_eq!(index.lookup(b"internex"), None);
    }

    #[test]
    fn test_node_count_reflects_compression() {
        // Root, "a" with tail "bcde": two flattened nodes for five trie edges.
        let index = build_index(&[b"abcde"]);
        assert_eq!(index.n_nodes(), 2);
        assert_eq!(index.lookup(b"abcde"), Some(0));
        assert_eq!(index.lookup(b"abcd"), None);
    }

    #[test]
    fn test_lookup_deterministic() {
        let index = build_index(&[b"alpha", b"beta", b"gamma"]);
        let first = index.lookup(b"beta");
        for _ in 0..10 {
            assert_eq!(index.lookup(b"beta"), first);
        }
    }

    #[test]
    fn test_size_monotone_under_superset() {
        let keys: &[&[u8]] = &[
            b"app", b"apple", b"applied", b"apply", b"banana", b"band", b"bandana",
        ];
        let mut last_size = 0;
        for n in 1..=keys.len() {
            let index = build_index(&keys[..n]);
            let size = index.size();
            assert!(size >= last_size, "size shrank from {last_size} to {size}");
            last_size = size;
        }
    }
}
