//! Length-limited canonical Huffman codes.
//!
//! Code lengths are derived from symbol counts with a plain Huffman tree
//! built over an index arena.  When the tree is deeper than the limit, all
//! counts are halved (non-zero counts stay non-zero) and the tree is rebuilt;
//! flattening the counts always converges to a balanced tree.
//!
//! Codes are assigned canonically (shorter codes first, ties by symbol), so
//! only the lengths travel in the stream.  The serialized table is:
//!
//! ```text
//! varint(max_len)
//! { varint(symbol - previous_symbol)  varint(max_len - len) }*   (first delta counts from -1)
//! varint(0)
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::bits::{BitReader, BitWriter};
use crate::config::HUFFMAN_MAX_CODE_LEN;
use crate::error::Corruption;

// ─────────────────────────────────────────────────────────────────────────────
// Code-length construction
// ─────────────────────────────────────────────────────────────────────────────

/// Code length per symbol for `freqs`, none longer than `max_len`.
///
/// Unused symbols get length 0.  A single used symbol gets length 1.
pub fn build_code_lens(freqs: &[u32], max_len: u8) -> Vec<u8> {
    let mut lens = vec![0u8; freqs.len()];
    let used: Vec<usize> = (0..freqs.len()).filter(|&s| freqs[s] > 0).collect();

    match used.len() {
        0 => return lens,
        1 => {
            lens[used[0]] = 1;
            return lens;
        }
        _ => {}
    }

    let mut weights: Vec<u64> = used.iter().map(|&s| freqs[s] as u64).collect();
    loop {
        let depths = tree_depths(&weights);
        if depths.iter().all(|&d| d <= max_len as u32) {
            for (i, &s) in used.iter().enumerate() {
                lens[s] = depths[i] as u8;
            }
            return lens;
        }
        for w in weights.iter_mut() {
            *w = (*w >> 1) | 1;
        }
    }
}

/// Leaf depths of a Huffman tree over `weights` (at least two leaves).
fn tree_depths(weights: &[u64]) -> Vec<u32> {
    let leaves = weights.len();
    // Nodes [0, leaves) are leaves; internal nodes are appended after them.
    let mut parent = vec![0usize; 2 * leaves - 1];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| Reverse((w, i)))
        .collect();

    let mut next = leaves;
    while heap.len() > 1 {
        let (Some(Reverse((wa, a))), Some(Reverse((wb, b)))) = (heap.pop(), heap.pop()) else {
            break;
        };
        parent[a] = next;
        parent[b] = next;
        heap.push(Reverse((wa + wb, next)));
        next += 1;
    }

    // Parents always have larger indices, so one reverse sweep computes depth.
    let root = next - 1;
    let mut depth = vec![0u32; next];
    for node in (0..root).rev() {
        depth[node] = depth[parent[node]] + 1;
    }
    depth.truncate(leaves);
    depth
}

/// Canonical codes for `lens`; code of an unused symbol is 0.
pub fn canonical_codes(lens: &[u8]) -> Vec<u16> {
    let mut order: Vec<usize> = (0..lens.len()).filter(|&s| lens[s] > 0).collect();
    order.sort_by_key(|&s| (lens[s], s));

    let mut codes = vec![0u16; lens.len()];
    let mut code = 0u32;
    let mut prev_len = 0u8;
    for s in order {
        code <<= lens[s] - prev_len;
        codes[s] = code as u16;
        code += 1;
        prev_len = lens[s];
    }
    codes
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoder
// ─────────────────────────────────────────────────────────────────────────────

pub struct HuffmanEncoder {
    lens: Vec<u8>,
    codes: Vec<u16>,
}

impl HuffmanEncoder {
    pub fn from_freqs(freqs: &[u32]) -> Self {
        Self::from_code_lens(build_code_lens(freqs, HUFFMAN_MAX_CODE_LEN))
    }

    pub fn from_code_lens(lens: Vec<u8>) -> Self {
        let codes = canonical_codes(&lens);
        Self { lens, codes }
    }

    #[inline]
    pub fn code_lens(&self) -> &[u8] {
        &self.lens
    }

    #[inline]
    pub fn put(&self, w: &mut BitWriter, symbol: usize) {
        debug_assert!(self.lens[symbol] > 0);
        w.put(self.codes[symbol] as u32, self.lens[symbol] as u32);
    }

    /// Serializes the code lengths.
    pub fn write_table(&self, w: &mut BitWriter) {
        let max_len = self.lens.iter().copied().max().unwrap_or(0);
        w.put_varint(max_len as u32);
        let mut prev: isize = -1;
        for (s, &len) in self.lens.iter().enumerate() {
            if len == 0 {
                continue;
            }
            w.put_varint((s as isize - prev) as u32);
            w.put_varint((max_len - len) as u32);
            prev = s as isize;
        }
        w.put_varint(0);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoder
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Default)]
struct Entry {
    symbol: u16,
    len: u8,
}

/// Single-level lookup decoder indexed by the next `max_len` bits.
pub struct HuffmanDecoder {
    table: Vec<Entry>,
    max_len: u8,
}

impl HuffmanDecoder {
    /// Builds the lookup table, rejecting lengths above the limit and
    /// oversubscribed length sets.  Incomplete sets are accepted; their
    /// unassigned codes decode as [`Corruption::BadHuffmanCode`].
    pub fn from_code_lens(lens: &[u8]) -> Result<Self, Corruption> {
        let max_len = lens.iter().copied().max().unwrap_or(0);
        if max_len > HUFFMAN_MAX_CODE_LEN {
            return Err(Corruption::BadHuffmanTable);
        }

        let kraft: u64 = lens
            .iter()
            .filter(|&&l| l > 0)
            .map(|&l| 1u64 << (max_len - l))
            .sum();
        if kraft > 1u64 << max_len {
            return Err(Corruption::BadHuffmanTable);
        }

        let codes = canonical_codes(lens);
        let mut table = vec![Entry::default(); 1usize << max_len];
        for (s, &len) in lens.iter().enumerate() {
            if len == 0 {
                continue;
            }
            let shift = max_len - len;
            let first = (codes[s] as usize) << shift;
            for e in &mut table[first..first + (1usize << shift)] {
                *e = Entry {
                    symbol: s as u16,
                    len,
                };
            }
        }
        Ok(Self { table, max_len })
    }

    /// Reads a table written by [`HuffmanEncoder::write_table`] for an
    /// alphabet of `nsyms` symbols.
    pub fn read_table(r: &mut BitReader<'_>, nsyms: usize) -> Result<Self, Corruption> {
        let max_len = r.get_varint()?;
        if max_len > HUFFMAN_MAX_CODE_LEN as u32 {
            return Err(Corruption::BadHuffmanTable);
        }

        let mut lens = vec![0u8; nsyms];
        let mut prev: isize = -1;
        loop {
            let delta = r.get_varint()?;
            if delta == 0 {
                break;
            }
            let s = prev + delta as isize;
            if s as usize >= nsyms {
                return Err(Corruption::BadHuffmanTable);
            }
            let short = r.get_varint()?;
            if short >= max_len {
                return Err(Corruption::BadHuffmanTable);
            }
            lens[s as usize] = (max_len - short) as u8;
            prev = s;
        }
        Self::from_code_lens(&lens)
    }

    #[inline]
    pub fn decode(&self, r: &mut BitReader<'_>) -> Result<usize, Corruption> {
        if self.max_len == 0 {
            return Err(Corruption::BadHuffmanCode);
        }
        let e = self.table[r.peek(self.max_len as u32) as usize];
        if e.len == 0 {
            return Err(Corruption::BadHuffmanCode);
        }
        r.skip(e.len as u32)?;
        Ok(e.symbol as usize)
    }
}
