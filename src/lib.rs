//! # Succinct Ordered-String Index
//!
//! *A LOUDS-Patricia trie: membership and rank over sorted byte strings,
//! close to the information-theoretic space minimum.*
//!
//! ## Intuition First
//!
//! Imagine a phone book where, instead of writing every name in full, each
//! page only records how a name differs from the one above it, and the page
//! numbers themselves encode the alphabetical position. You can still answer
//! "is this name listed, and at which position?" — but the book has shrunk to
//! a fraction of its size, because all the shared prefixes are stored once.
//!
//! ## The Problem
//!
//! A pointer-based trie answers membership fast but spends $O(\log n)$ bits
//! per edge on pointers alone. For large sorted dictionaries the pointers
//! dwarf the keys. Two classic ideas remove them:
//!
//! - **LOUDS** (Jacobson): encode the tree shape breadth-first as unary child
//!   counts — a run of 0s per child, terminated by a 1 — and navigate with
//!   rank/select instead of pointers, at 2 bits per node.
//! - **Patricia** (Morrison): collapse unary chains of single-child nodes
//!   into raw byte runs, so long unshared suffixes cost one byte per
//!   character instead of one node per character.
//!
//! This crate combines both: sorted keys stream into a per-level trie
//! builder, a breadth-first pass flattens it into one LOUDS sequence with
//! tail-compressed edges, and lookups return each key's dense ordinal in
//! `[0, n_keys)`.
//!
//! ## Historical Context
//!
//! ```text
//! 1968  Morrison    PATRICIA: path-compressed binary tries
//! 1989  Jacobson    LOUDS and the succinct paradigm (rank/select)
//! 1996  Munro-Raman Constant-time rank and select in o(n) extra space
//! 2008  Delpratt    Engineering LOUDS tries for large dictionaries
//! 2014  Yata        marisa-trie: recursive LOUDS-Patricia in practice
//! ```
//!
//! ## Mathematical Formulation
//!
//! For $n$ nodes the LOUDS sequence uses $2n + o(n)$ bits; terminal and link
//! markers add $2n + o(n)$ more; labels and tails store exactly the key bytes
//! not shared between keys. Rank/select indexes add under 25% on top of the
//! raw bits. The fundamental operations:
//!
//! - `rank(i)`: number of set bits in $[0, i)$.
//! - `select(k)`: position of the $k$-th set bit (0-indexed).
//!
//! ## Complexity Analysis
//!
//! - **Build**: $O(\text{total key bytes})$, single pass, one BFS.
//! - **Lookup**: $O(|q| \log \sigma)$ — one select, one forward bit scan and
//!   one binary search over siblings per consumed branch byte.
//! - **Space**: within a small constant of the trie's information content.
//!
//! ## What Could Go Wrong
//!
//! 1. **Order discipline**: keys must be added in strictly ascending byte
//!    order; the builder rejects violations rather than corrupting state.
//! 2. **Static structure**: after [`Patricia::build`] the index is immutable.
//!    There is no delete, no update, and no rebuild-in-place.
//! 3. **Emergent numbering**: ordinals follow breadth-first construction
//!    order, not lexicographic order. They are dense and stable, but do not
//!    assume `lookup(min_key) == 0`.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - [`BitVector`]: append-only bit buffer with one-shot rank/select indexing.
//! - [`Trie`]: the uncompressed per-level builder for sorted insertion.
//! - [`Patricia`]: the flattened LOUDS-Patricia index and its lookup.
//!
//! ## References
//!
//! - Morrison, D. R. (1968). "PATRICIA — Practical Algorithm To Retrieve
//!   Information Coded in Alphanumeric."
//! - Jacobson, G. (1989). "Space-efficient Static Trees and Graphs."
//! - Yata, S. (2011). "Dictionary Compression by Nesting Prefix/Patricia
//!   Tries."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitvec;
pub mod error;
pub mod patricia;
pub mod trie;

pub use bitvec::BitVector;
pub use error::Error;
pub use patricia::Patricia;
pub use trie::Trie;
