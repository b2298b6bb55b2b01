//! Append-only succinct bit vector with rank/select support.
//!
//! Bits are packed into 64-bit words and the backing store grows in 256-bit
//! chunks, so a trie builder can stream bits in one at a time. A one-shot
//! [`BitVector::build`] then derives two small read-only indexes:
//!
//! - **Rank blocks**: one entry per 256-bit block, holding the absolute
//!   1-count at the block's start plus three relative counts for the block's
//!   2nd-4th words (the 1st word's relative count is implicitly zero).
//! - **Select samples**: for every 256th set bit, the 256-bit block that
//!   contains it, used to seed the search in [`BitVector::select`].
//!
//! Together these give $O(1)$ rank and near-constant select in well under
//! $n/4$ extra bits.
//!
//! # Lifecycle
//!
//! `add`/`set` are only valid before `build`; `rank`/`select` only after.
//! The indexes carry sentinel entries so the search loops never need bounds
//! branches.

/// Per-256-bit-block rank directory entry.
///
/// `abs` is the number of set bits before the block; `rels[j]` is the number
/// of set bits between the block start and the end of word `j` of the block.
#[derive(Clone, Copy, Default)]
struct RankBlock {
    abs: u64,
    rels: [u8; 3],
}

/// An append-only succinct bit vector.
#[derive(Default)]
pub struct BitVector {
    /// Raw bit storage, always a whole number of 256-bit chunks.
    words: Vec<u64>,
    /// Rank directory, one entry per block plus a sentinel (valid after build).
    ranks: Vec<RankBlock>,
    /// Select samples, block id per 256 set bits plus a sentinel.
    selects: Vec<u32>,
    n_bits: usize,
}

impl std::fmt::Debug for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitVector")
            .field("len", &self.n_bits)
            .field("ones", &self.ranks.last().map_or(0, |r| r.abs))
            .finish()
    }
}

impl BitVector {
    /// Create an empty bit vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the total number of bits appended so far.
    pub fn len(&self) -> usize {
        self.n_bits
    }

    /// Return true if no bits have been appended.
    pub fn is_empty(&self) -> bool {
        self.n_bits == 0
    }

    /// Return the total number of set bits. Only valid after [`build`](Self::build).
    pub fn ones(&self) -> usize {
        self.ranks.last().map_or(0, |r| r.abs) as usize
    }

    /// Return true if the bit at index `i` is set.
    ///
    /// Precondition: `i < len()`.
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.n_bits);
        (self.words[i / 64] >> (i % 64)) & 1 != 0
    }

    /// Overwrite the bit at index `i`.
    ///
    /// Only used before [`build`](Self::build), to patch a previously appended
    /// LOUDS run terminator when a sibling run is reopened.
    ///
    /// Precondition: `i < len()`.
    pub fn set(&mut self, i: usize, bit: bool) {
        debug_assert!(i < self.n_bits);
        if bit {
            self.words[i / 64] |= 1u64 << (i % 64);
        } else {
            self.words[i / 64] &= !(1u64 << (i % 64));
        }
    }

    /// Append one bit, growing the backing store in 256-bit chunks.
    pub fn add(&mut self, bit: bool) {
        if self.n_bits % 256 == 0 {
            self.words.resize(self.words.len() + 4, 0);
        }
        self.n_bits += 1;
        self.set(self.n_bits - 1, bit);
    }

    /// Build the rank and select indexes. One-shot: no `add`/`set` afterwards.
    pub fn build(&mut self) {
        let n_blocks = self.words.len() / 4;
        let mut n_ones: u64 = 0;
        self.ranks = vec![RankBlock::default(); n_blocks + 1];
        self.selects.clear();
        for block_id in 0..n_blocks {
            self.ranks[block_id].abs = n_ones;
            let block_abs = n_ones;
            for j in 0..4 {
                if j != 0 {
                    self.ranks[block_id].rels[j - 1] = (n_ones - block_abs) as u8;
                }

                let word_id = block_id * 4 + j;
                let word = self.words[word_id];
                let n_pops = word.count_ones() as u64;
                let new_n_ones = n_ones + n_pops;
                // A select sample is due whenever this word carries a set bit
                // whose 0-indexed rank is a multiple of 256. At most one per
                // word, since a word holds at most 64 ones.
                if n_ones.div_ceil(256) != new_n_ones.div_ceil(256) {
                    let mut count = n_ones;
                    let mut rest = word;
                    while rest != 0 {
                        let pos = rest.trailing_zeros() as usize;
                        if count % 256 == 0 {
                            self.selects.push(((word_id * 64 + pos) / 256) as u32);
                            break;
                        }
                        rest ^= 1u64 << pos;
                        count += 1;
                    }
                }
                n_ones = new_n_ones;
            }
        }
        self.ranks[n_blocks].abs = n_ones;
        self.selects.push((self.words.len() * 64 / 256) as u32);
    }

    /// Return the number of set bits in the range `[0, i)`.
    ///
    /// Precondition: `i < len()` and [`build`](Self::build) has been called.
    /// For the total 1-count use [`ones`](Self::ones).
    pub fn rank(&self, i: usize) -> usize {
        debug_assert!(i < self.n_bits);
        let word_id = i / 64;
        let bit_id = i % 64;
        let rank_id = word_id / 4;
        let rel_id = word_id % 4;
        let mut n = self.ranks[rank_id].abs as usize;
        if rel_id != 0 {
            n += self.ranks[rank_id].rels[rel_id - 1] as usize;
        }
        n + (self.words[word_id] & ((1u64 << bit_id) - 1)).count_ones() as usize
    }

    /// Return the position of the `(i+1)`-th set bit (0-indexed).
    ///
    /// Precondition: `i < ones()` and [`build`](Self::build) has been called.
    /// Querying an empty vector, or exactly at the total 1-count, is a
    /// contract violation, not a recoverable condition.
    pub fn select(&self, i: usize) -> usize {
        debug_assert!(i < self.ones());
        let sample_id = i / 256;
        let mut begin = self.selects[sample_id] as usize;
        let mut end = self.selects[sample_id + 1] as usize + 1;
        if begin + 10 >= end {
            // Candidate span is small: a linear scan beats the branchy search.
            while i as u64 >= self.ranks[begin + 1].abs {
                begin += 1;
            }
        } else {
            while begin + 1 < end {
                let middle = (begin + end) / 2;
                if (i as u64) < self.ranks[middle].abs {
                    end = middle;
                } else {
                    begin = middle;
                }
            }
        }
        let rank_id = begin;
        let mut i = i - self.ranks[rank_id].abs as usize;

        // Relative counts narrow the 256-bit block down to one word.
        let rels = self.ranks[rank_id].rels;
        let mut word_id = rank_id * 4;
        if i < rels[1] as usize {
            if i >= rels[0] as usize {
                word_id += 1;
                i -= rels[0] as usize;
            }
        } else if i < rels[2] as usize {
            word_id += 2;
            i -= rels[1] as usize;
        } else {
            word_id += 3;
            i -= rels[2] as usize;
        }
        word_id * 64 + self.select_in_word(self.words[word_id], i)
    }

    /// Return the position of the first set bit at or after `i`.
    ///
    /// Used to delimit a LOUDS child run with direct word inspection instead
    /// of a second select call. Precondition: such a bit exists within the
    /// allocated words.
    pub fn next_one(&self, i: usize) -> usize {
        let mut pos = i;
        let mut word = self.words[pos / 64] >> (pos % 64);
        if word == 0 {
            pos += 64 - (pos % 64);
            word = self.words[pos / 64];
            while word == 0 {
                pos += 64;
                word = self.words[pos / 64];
            }
        }
        pos + word.trailing_zeros() as usize
    }

    /// Approximate memory usage of the backing arrays and indexes, in bytes.
    pub fn heap_bytes(&self) -> usize {
        self.words.len() * 8
            + self.ranks.len() * std::mem::size_of::<RankBlock>()
            + self.selects.len() * 4
    }

    #[allow(unreachable_code)]
    fn select_in_word(&self, word: u64, k: usize) -> usize {
        #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
        {
            unsafe {
                let mask = 1u64 << k;
                let res = core::arch::x86_64::_pdep_u64(mask, word);
                return res.trailing_zeros() as usize;
            }
        }

        // Portable fallback: clear the lowest set bit k times, O(popcount).
        let mut rest = word;
        for _ in 0..k {
            rest &= rest - 1;
        }
        rest.trailing_zeros() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_bits(bits: &[bool]) -> BitVector {
        let mut bv = BitVector::new();
        for &b in bits {
            bv.add(b);
        }
        bv.build();
        bv
    }

    #[test]
    fn test_rank_basic() {
        let bv = from_bits(&[true, true, false, true, false, false, true]);
        assert_eq!(bv.rank(0), 0);
        assert_eq!(bv.rank(1), 1);
        assert_eq!(bv.rank(4), 3);
        assert_eq!(bv.ones(), 4);
        assert!(bv.get(0));
        assert!(!bv.get(2));
    }

    #[test]
    fn test_select_basic() {
        let bv = from_bits(&[true, true, false, true]);
        assert_eq!(bv.select(0), 0);
        assert_eq!(bv.select(1), 1);
        assert_eq!(bv.select(2), 3);
    }

    #[test]
    fn test_set_patches_before_build() {
        let mut bv = BitVector::new();
        bv.add(false);
        bv.add(true);
        bv.set(1, false);
        bv.add(true);
        bv.build();
        assert_eq!(bv.ones(), 1);
        assert_eq!(bv.select(0), 2);
    }

    #[test]
    fn test_next_one() {
        let mut bv = BitVector::new();
        for _ in 0..200 {
            bv.add(false);
        }
        bv.add(true);
        bv.build();
        assert_eq!(bv.next_one(0), 200);
        assert_eq!(bv.next_one(200), 200);
    }

    #[test]
    fn test_rank_select_across_blocks() {
        // Every third bit set, spanning several 256-bit blocks and at least
        // one select sample boundary (> 256 ones).
        let n = 2048;
        let mut bv = BitVector::new();
        let mut positions = Vec::new();
        for i in 0..n {
            let bit = i % 3 == 0;
            if bit {
                positions.push(i);
            }
            bv.add(bit);
        }
        bv.build();
        assert_eq!(bv.ones(), positions.len());
        let mut expected = 0;
        for i in 0..n {
            assert_eq!(bv.rank(i), expected);
            if i % 3 == 0 {
                expected += 1;
            }
        }
        for (k, &pos) in positions.iter().enumerate() {
            assert_eq!(bv.select(k), pos);
            assert_eq!(bv.rank(pos), k);
        }
    }

    #[test]
    fn test_dense_run_select() {
        // 600 consecutive ones exercises the linear-scan path and the
        // relative-count thresholds inside a single block span.
        let mut bv = BitVector::new();
        for _ in 0..600 {
            bv.add(true);
        }
        bv.build();
        for k in 0..600 {
            assert_eq!(bv.select(k), k);
        }
    }
}
