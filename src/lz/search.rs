//! Hash-chain match finder.
//!
//! The index is an arena of two integer tables:
//!
//! - `head[h]` holds `position + 1` of the most recent position whose next
//!   four bytes hash to `h` (0 = empty).  Entries are full `usize` positions,
//!   so inputs past 4 GiB keep matching.  The table has `1 << hash_log`
//!   slots, with `hash_log` scaled to the window.
//! - `chain[p & mask]` holds the distance from `p` to the previous position
//!   with the same hash (0 = end of chain).
//!
//! Insertion is lazy: every search first inserts all positions in
//! `[next_to_insert, pos)`, so each position the parser moves past ends up in
//! the index exactly once, whether it was covered by a literal or a match.
//!
//! Candidates are walked most-recent first.  Hash collisions and chain slots
//! recycled by the window mask are harmless: every candidate is verified by
//! comparing bytes before it is reported.

use super::types::{common_prefix, hash4, Match};
use crate::config::{
    HASH_CHAIN_LOG, HASH_LOG_MAX, HASH_LOG_MIN, MAX_MATCH, MIN_MATCH, MIN_WINDOW_SIZE, WINDOW_SIZE,
};

// ─────────────────────────────────────────────────────────────────────────────
// MatchProbe
// ─────────────────────────────────────────────────────────────────────────────

/// The two questions the lazy parser asks of a match finder.
pub trait MatchProbe {
    /// Best match at `pos`, examining at most `depth` candidates.  Among
    /// equal lengths the smallest distance wins.
    fn find_match(&mut self, pos: usize, depth: usize) -> Option<Match>;

    /// Whether some candidate among the first `depth` at `pos` matches for at
    /// least `min_len` bytes.
    fn has_match(&mut self, pos: usize, min_len: usize, depth: usize) -> bool;
}

// ─────────────────────────────────────────────────────────────────────────────
// MatchFinder
// ─────────────────────────────────────────────────────────────────────────────

pub struct MatchFinder<'a> {
    src: &'a [u8],
    head: Vec<usize>,
    chain: Vec<u32>,
    mask: usize,
    hash_log: u32,
    next_to_insert: usize,
}

impl<'a> MatchFinder<'a> {
    /// Allocates an index sized for `src`: the chain arena is the next power
    /// of two above the input length, clamped to `[MIN_WINDOW_SIZE, WINDOW_SIZE]`,
    /// and the head table grows with it.
    pub fn new(src: &'a [u8]) -> Self {
        let window = src
            .len()
            .next_power_of_two()
            .clamp(MIN_WINDOW_SIZE, WINDOW_SIZE);
        let hash_log = window
            .trailing_zeros()
            .saturating_sub(HASH_CHAIN_LOG)
            .clamp(HASH_LOG_MIN, HASH_LOG_MAX);
        Self {
            src,
            head: vec![0; 1 << hash_log],
            chain: vec![0; window],
            mask: window - 1,
            hash_log,
            next_to_insert: 0,
        }
    }

    /// log2 of the number of hash heads.
    #[inline]
    pub fn hash_log(&self) -> u32 {
        self.hash_log
    }

    /// Largest distance a reported match can have.
    #[inline]
    pub fn max_distance(&self) -> usize {
        self.mask
    }

    /// Inserts every position in `[next_to_insert, target)` that still has
    /// four bytes to hash.
    pub fn insert_up_to(&mut self, target: usize) {
        let hashable_end = self.src.len().saturating_sub(MIN_MATCH - 1);
        let end = target.min(hashable_end);
        let mut idx = self.next_to_insert;

        while idx < end {
            let h = hash4(self.src, idx, self.hash_log);
            let prev = self.head[h];
            let mut delta = if prev == 0 { 0 } else { idx + 1 - prev };
            if delta > self.mask {
                delta = 0;
            }
            self.chain[idx & self.mask] = delta as u32;
            self.head[h] = idx + 1;
            idx += 1;
        }

        if target > self.next_to_insert {
            self.next_to_insert = target;
        }
    }

    /// Walks the chain for `pos`, calling `visit(candidate)` for each earlier
    /// position within the window until `depth` candidates were visited or
    /// `visit` returns `true`.
    #[inline]
    fn walk<F>(&mut self, pos: usize, depth: usize, mut visit: F)
    where
        F: FnMut(&[u8], usize) -> bool,
    {
        self.insert_up_to(pos);

        let src = self.src;
        let max_distance = self.max_distance();
        let mut cand_plus1 = self.head[hash4(src, pos, self.hash_log)];
        let mut budget = depth;

        while cand_plus1 != 0 && budget > 0 {
            let cand = cand_plus1 - 1;
            let delta = self.chain[cand & self.mask] as usize;

            // Lookahead probes may already have inserted positions at or
            // beyond `pos`; those are skipped without spending budget.
            if cand < pos {
                if pos - cand > max_distance {
                    break;
                }
                budget -= 1;
                if visit(src, cand) {
                    break;
                }
            }

            if delta == 0 || delta > cand {
                break;
            }
            cand_plus1 -= delta;
        }
    }
}

impl MatchProbe for MatchFinder<'_> {
    fn find_match(&mut self, pos: usize, depth: usize) -> Option<Match> {
        if depth == 0 || pos + MIN_MATCH > self.src.len() {
            return None;
        }

        let limit = MAX_MATCH.min(self.src.len() - pos);
        let mut best_len = MIN_MATCH - 1;
        let mut best_dist = 0usize;

        self.walk(pos, depth, |src, cand| {
            // Only a candidate that also matches at `best_len` can be longer.
            if src[cand + best_len] != src[pos + best_len] {
                return false;
            }
            let len = common_prefix(src, cand, pos, limit);
            if len > best_len {
                best_len = len;
                best_dist = pos - cand;
            }
            best_len == limit
        });

        if best_dist == 0 {
            return None;
        }
        Some(Match::new(best_dist as u32, best_len as u32))
    }

    fn has_match(&mut self, pos: usize, min_len: usize, depth: usize) -> bool {
        let min_len = min_len.max(MIN_MATCH);
        if depth == 0 || min_len > MAX_MATCH || pos + min_len > self.src.len() {
            return false;
        }

        let mut found = false;
        self.walk(pos, depth, |src, cand| {
            if src[cand + min_len - 1] != src[pos + min_len - 1] {
                return false;
            }
            found = common_prefix(src, cand, pos, min_len) == min_len;
            found
        });
        found
    }
}
