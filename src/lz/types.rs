//! Core LZ types and byte-level helpers shared by the match finder, the
//! parser, and the reconstructor.
//!
//!   - [`Match`]: a back-reference candidate `(distance, length)`
//!   - [`Token`]: one parse decision: a literal byte or a match
//!   - [`hash4`]: 4-byte Knuth multiplicative hash used to key the index
//!   - [`read32`] / [`read64`]: little-endian unaligned loads from a slice
//!   - [`common_prefix`]: forward match length between two positions

use crate::config::MIN_MATCH;

// ─────────────────────────────────────────────────────────────────────────────
// Match / Token
// ─────────────────────────────────────────────────────────────────────────────

/// A back-reference: copy `length` bytes starting `distance` bytes back.
///
/// Produced by the match finder only when `1 <= distance <= position` and
/// `length >= MIN_MATCH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub distance: u32,
    pub length: u32,
}

impl Match {
    #[inline]
    pub fn new(distance: u32, length: u32) -> Self {
        debug_assert!(distance >= 1);
        debug_assert!(length as usize >= MIN_MATCH);
        Self { distance, length }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length as usize
    }
}

/// One decision of the parse.  Replaying a token sequence in order against
/// an empty buffer reproduces the source exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    Match { length: u32, distance: u32 },
}

impl Token {
    /// Number of output bytes this token produces.
    #[inline]
    pub fn output_len(&self) -> usize {
        match *self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => length as usize,
        }
    }
}

impl From<Match> for Token {
    fn from(m: Match) -> Self {
        Token::Match {
            length: m.length,
            distance: m.distance,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unaligned little-endian reads
// ─────────────────────────────────────────────────────────────────────────────

/// Reads 4 bytes at `pos` as a little-endian `u32`.
///
/// Callers guarantee `pos + 4 <= src.len()`.
#[inline(always)]
pub fn read32(src: &[u8], pos: usize) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&src[pos..pos + 4]);
    u32::from_le_bytes(b)
}

/// Reads 8 bytes at `pos` as a little-endian `u64`.
#[inline(always)]
pub fn read64(src: &[u8], pos: usize) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&src[pos..pos + 8]);
    u64::from_le_bytes(b)
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing
// ─────────────────────────────────────────────────────────────────────────────

/// `(read32(src, pos) * 2654435761) >> (32 - hash_log)`
#[inline(always)]
pub fn hash4(src: &[u8], pos: usize, hash_log: u32) -> usize {
    (read32(src, pos).wrapping_mul(2_654_435_761u32) >> (32 - hash_log)) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Forward match length
// ─────────────────────────────────────────────────────────────────────────────

/// Number of equal bytes at `earlier` and `later`, capped at `limit`.
///
/// Compares eight bytes at a time; the first differing byte of a word is
/// found from the trailing zero count of the XOR (little-endian loads).
/// Requires `earlier < later` and `later + limit <= src.len()`.
#[inline]
pub fn common_prefix(src: &[u8], earlier: usize, later: usize, limit: usize) -> usize {
    debug_assert!(earlier < later);
    debug_assert!(later + limit <= src.len());

    let mut n = 0usize;
    while n + 8 <= limit {
        let diff = read64(src, earlier + n) ^ read64(src, later + n);
        if diff != 0 {
            return n + (diff.trailing_zeros() / 8) as usize;
        }
        n += 8;
    }
    while n < limit && src[earlier + n] == src[later + n] {
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_prefix_stops_at_first_difference() {
        let src = b"abcdefghij_abcdefghiX";
        assert_eq!(common_prefix(src, 0, 11, 10), 9);
    }

    #[test]
    fn common_prefix_respects_limit() {
        let src = [7u8; 64];
        assert_eq!(common_prefix(&src, 0, 1, 63), 63);
        assert_eq!(common_prefix(&src, 0, 32, 20), 20);
    }

    #[test]
    fn common_prefix_word_boundary() {
        let mut src = vec![1u8; 40];
        src[20 + 13] = 2;
        assert_eq!(common_prefix(&src, 0, 20, 20), 13);
    }

    #[test]
    fn hash4_fits_table() {
        let src = [0xFFu8; 4];
        for log in [12, 16, 20] {
            assert!(hash4(&src, 0, log) < (1 << log));
        }
    }

    #[test]
    fn token_output_len() {
        assert_eq!(Token::Literal(b'x').output_len(), 1);
        assert_eq!(Token::from(Match::new(3, 9)).output_len(), 9);
    }
}
