//! Reconstructor: replays tokens against the growing output buffer.
//!
//! All bounds are checked before a byte is written: a match whose distance
//! reaches before the start of the output, or any token that would run past
//! the declared end of the current block, is reported as corruption.

use super::types::Token;
use crate::error::Corruption;

/// Largest up-front reservation for one block; the buffer grows past it on
/// demand as tokens actually decode.
const BLOCK_RESERVE_MAX: usize = 1 << 24;

pub struct Reconstructor {
    out: Vec<u8>,
    block_end: usize,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            block_end: 0,
        }
    }

    /// Bytes produced so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Opens a block that must produce exactly `raw_len` bytes.
    pub fn begin_block(&mut self, raw_len: usize) {
        self.block_end = self.out.len() + raw_len;
        self.out.reserve(raw_len.min(BLOCK_RESERVE_MAX));
    }

    /// Checks that the current block produced exactly its declared size.
    pub fn end_block(&self) -> Result<(), Corruption> {
        if self.out.len() != self.block_end {
            return Err(Corruption::BlockSizeMismatch);
        }
        Ok(())
    }

    #[inline]
    pub fn literal(&mut self, byte: u8) -> Result<(), Corruption> {
        if self.out.len() >= self.block_end {
            return Err(Corruption::LengthOverrun);
        }
        self.out.push(byte);
        Ok(())
    }

    /// Appends `length` bytes copied from `distance` bytes back.  When
    /// `length > distance` the source range overlaps the bytes being written
    /// and the last `distance` bytes repeat.
    pub fn copy_match(&mut self, distance: usize, length: usize) -> Result<(), Corruption> {
        let start = self.out.len();
        if distance == 0 || distance > start {
            return Err(Corruption::DistanceTooFar {
                distance: distance as u64,
                available: start as u64,
            });
        }
        if length > self.block_end - start {
            return Err(Corruption::LengthOverrun);
        }

        let from = start - distance;
        if length <= distance {
            self.out.extend_from_within(from..from + length);
            return Ok(());
        }

        // Each pass doubles the replicated span.
        let mut copied = 0usize;
        while copied < length {
            let chunk = (length - copied).min(self.out.len() - from);
            self.out.extend_from_within(from..from + chunk);
            copied += chunk;
        }
        Ok(())
    }

    pub fn apply(&mut self, token: &Token) -> Result<(), Corruption> {
        match *token {
            Token::Literal(b) => self.literal(b),
            Token::Match { length, distance } => self.copy_match(distance as usize, length as usize),
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.out
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.out
    }
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self::new()
    }
}

/// Replays a whole token sequence as a single block.
pub fn replay(tokens: &[Token]) -> Result<Vec<u8>, Corruption> {
    let total = tokens.iter().map(Token::output_len).sum();
    let mut r = Reconstructor::with_capacity(total);
    r.begin_block(total);
    for t in tokens {
        r.apply(t)?;
    }
    r.end_block()?;
    Ok(r.into_inner())
}
