//! Token encoder: maps parse decisions to entropy-coder symbols.
//!
//! Match lengths (`length - MIN_MATCH`) and distances (`distance - 1`) are
//! split into a *slot* and raw extra bits:
//!
//! ```text
//! v < 4            slot = v                       no extra bits
//! v >= 4           hb   = index of highest set bit
//!                  m    = bit hb-1 of v
//!                  slot = 2*hb + m                extra = low hb-1 bits of v
//! ```
//!
//! Literal bytes and length slots share one alphabet of `256 + 32` symbols;
//! distance slots form a second alphabet of 48 symbols.  [`TokenEncoder`]
//! keeps the symbol histograms the Huffman stage needs.

use super::types::Token;
use crate::config::MIN_MATCH;

pub const LITERAL_SYMBOLS: usize = 256;
pub const LENGTH_SLOTS: usize = 32;
pub const LITLEN_SYMBOLS: usize = LITERAL_SYMBOLS + LENGTH_SLOTS;
pub const DIST_SYMBOLS: usize = 48;

// ─────────────────────────────────────────────────────────────────────────────
// Slot coding
// ─────────────────────────────────────────────────────────────────────────────

/// A value split into its slot and the raw bits that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCode {
    pub slot: u8,
    pub nbits: u8,
    pub extra: u32,
}

#[inline]
pub fn slot_code(v: u32) -> SlotCode {
    if v < 4 {
        return SlotCode {
            slot: v as u8,
            nbits: 0,
            extra: 0,
        };
    }
    let hb = 31 - v.leading_zeros();
    let m = (v >> (hb - 1)) & 1;
    let nbits = hb - 1;
    SlotCode {
        slot: (2 * hb + m) as u8,
        nbits: nbits as u8,
        extra: v & ((1 << nbits) - 1),
    }
}

/// Number of extra bits that follow `slot`.
#[inline]
pub fn slot_nbits(slot: u8) -> u32 {
    if slot < 4 {
        0
    } else {
        (slot as u32 >> 1) - 1
    }
}

/// Smallest value coded with `slot`.
#[inline]
pub fn slot_base(slot: u8) -> u32 {
    if slot < 4 {
        return slot as u32;
    }
    let hb = slot as u32 >> 1;
    let m = slot as u32 & 1;
    (2 | m) << (hb - 1)
}

/// Extra-bit cost of coding `v`; used by the parser's deferral rule.
#[inline]
pub fn slot_extra_bits(v: u32) -> u32 {
    if v < 4 {
        0
    } else {
        30 - v.leading_zeros()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Coded tokens
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodedToken {
    Literal(u8),
    Match { length: SlotCode, distance: SlotCode },
}

/// Collects coded tokens of one block together with their symbol counts.
pub struct TokenEncoder {
    coded: Vec<CodedToken>,
    litlen_freq: [u32; LITLEN_SYMBOLS],
    dist_freq: [u32; DIST_SYMBOLS],
}

impl Default for TokenEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEncoder {
    pub fn new() -> Self {
        Self {
            coded: Vec::new(),
            litlen_freq: [0; LITLEN_SYMBOLS],
            dist_freq: [0; DIST_SYMBOLS],
        }
    }

    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut enc = Self::new();
        enc.coded.reserve(tokens.len());
        for t in tokens {
            enc.push(t);
        }
        enc
    }

    pub fn push(&mut self, token: &Token) {
        match *token {
            Token::Literal(b) => {
                self.litlen_freq[b as usize] += 1;
                self.coded.push(CodedToken::Literal(b));
            }
            Token::Match { length, distance } => {
                debug_assert!(length as usize >= MIN_MATCH);
                debug_assert!(distance >= 1);
                let length = slot_code(length - MIN_MATCH as u32);
                let distance = slot_code(distance - 1);
                self.litlen_freq[LITERAL_SYMBOLS + length.slot as usize] += 1;
                self.dist_freq[distance.slot as usize] += 1;
                self.coded.push(CodedToken::Match { length, distance });
            }
        }
    }

    pub fn clear(&mut self) {
        self.coded.clear();
        self.litlen_freq = [0; LITLEN_SYMBOLS];
        self.dist_freq = [0; DIST_SYMBOLS];
    }

    #[inline]
    pub fn coded(&self) -> &[CodedToken] {
        &self.coded
    }

    #[inline]
    pub fn litlen_freq(&self) -> &[u32] {
        &self.litlen_freq
    }

    #[inline]
    pub fn dist_freq(&self) -> &[u32] {
        &self.dist_freq
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coded.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_MATCH, WINDOW_SIZE};

    #[test]
    fn small_values_are_their_own_slot() {
        for v in 0..4 {
            assert_eq!(slot_code(v), SlotCode { slot: v as u8, nbits: 0, extra: 0 });
        }
    }

    #[test]
    fn slot_boundaries() {
        assert_eq!(slot_code(4), SlotCode { slot: 4, nbits: 1, extra: 0 });
        assert_eq!(slot_code(5), SlotCode { slot: 4, nbits: 1, extra: 1 });
        assert_eq!(slot_code(6), SlotCode { slot: 5, nbits: 1, extra: 0 });
        assert_eq!(slot_code(8), SlotCode { slot: 6, nbits: 2, extra: 0 });
        assert_eq!(slot_code(12), SlotCode { slot: 7, nbits: 2, extra: 0 });
    }

    #[test]
    fn base_plus_extra_recovers_value() {
        for v in [0u32, 3, 4, 7, 100, 255, 4096, 65531, 1 << 20, (1 << 24) - 2] {
            let c = slot_code(v);
            assert_eq!(slot_nbits(c.slot), c.nbits as u32);
            assert_eq!(slot_base(c.slot) + c.extra, v);
            assert_eq!(slot_extra_bits(v), c.nbits as u32);
        }
    }

    #[test]
    fn alphabets_cover_limits() {
        assert!((slot_code((MAX_MATCH - MIN_MATCH) as u32).slot as usize) < LENGTH_SLOTS);
        assert!((slot_code((WINDOW_SIZE - 2) as u32).slot as usize) < DIST_SYMBOLS);
    }

    #[test]
    fn histograms_follow_tokens() {
        let enc = TokenEncoder::from_tokens(&[
            Token::Literal(b'a'),
            Token::Match { length: 4, distance: 1 },
            Token::Literal(b'a'),
        ]);
        assert_eq!(enc.len(), 3);
        assert_eq!(enc.litlen_freq()[b'a' as usize], 2);
        assert_eq!(enc.litlen_freq()[LITERAL_SYMBOLS], 1);
        assert_eq!(enc.dist_freq()[0], 1);
    }

    #[test]
    fn clear_resets_tokens_and_histograms() {
        let mut enc = TokenEncoder::from_tokens(&[
            Token::Literal(b'z'),
            Token::Match { length: 9, distance: 300 },
        ]);
        enc.clear();
        assert!(enc.is_empty());
        assert!(enc.litlen_freq().iter().all(|&f| f == 0));
        assert!(enc.dist_freq().iter().all(|&f| f == 0));

        enc.push(&Token::Literal(b'q'));
        assert_eq!(enc.coded(), &[CodedToken::Literal(b'q')]);
        assert_eq!(enc.litlen_freq()[b'q' as usize], 1);
    }
}
