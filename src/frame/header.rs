//! Frame constants, the frame header, and LEB128 / little-endian helpers.
//!
//! ```text
//! frame  := magic "ORZ\x1a" | version u8 | content_size LEB128
//!           block* | 0x00 | xxh32(content) u32 LE
//! block  := raw_len LEB128 (> 0) | token_count LEB128 | payload_len LEB128 | payload
//! ```

use crate::error::Corruption;

pub const MAGIC: [u8; 4] = *b"ORZ\x1a";
pub const FRAME_VERSION: u8 = 1;

/// Marks the end of the block list (a block never has `raw_len == 0`).
pub const END_MARK: u8 = 0x00;

pub const CHECKSUM_SIZE: usize = 4;

/// Longest LEB128 encoding of a `u64`.
const LEB128_MAX_BYTES: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// LEB128
// ─────────────────────────────────────────────────────────────────────────────

pub fn write_leb128(dst: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        dst.push((v as u8) | 0x80);
        v >>= 7;
    }
    dst.push(v as u8);
}

/// Reads a LEB128 value at `*pos`, advancing `*pos` past it.
pub fn read_leb128(src: &[u8], pos: &mut usize) -> Result<u64, Corruption> {
    let mut v = 0u64;
    for i in 0..LEB128_MAX_BYTES {
        let b = *src.get(*pos).ok_or(Corruption::Truncated)?;
        *pos += 1;
        let bits = (b & 0x7F) as u64;
        if i == LEB128_MAX_BYTES - 1 && bits > 1 {
            return Err(Corruption::VarintOverflow);
        }
        v |= bits << (7 * i);
        if b & 0x80 == 0 {
            return Ok(v);
        }
    }
    Err(Corruption::VarintOverflow)
}

/// LEB128 value that must fit a `usize`.
pub fn read_leb128_usize(src: &[u8], pos: &mut usize) -> Result<usize, Corruption> {
    usize::try_from(read_leb128(src, pos)?).map_err(|_| Corruption::VarintOverflow)
}

// ─────────────────────────────────────────────────────────────────────────────
// Little-endian helpers
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
pub fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        src[offset],
        src[offset + 1],
        src[offset + 2],
        src[offset + 3],
    ])
}

#[inline]
pub fn write_le32(dst: &mut Vec<u8>, value: u32) {
    dst.extend_from_slice(&value.to_le_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame header
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub content_size: u64,
}

impl FrameHeader {
    pub fn write(&self, dst: &mut Vec<u8>) {
        dst.extend_from_slice(&MAGIC);
        dst.push(FRAME_VERSION);
        write_leb128(dst, self.content_size);
    }

    /// Parses the header at the start of `src`; returns it with the offset
    /// of the first block.
    pub fn read(src: &[u8]) -> Result<(Self, usize), Corruption> {
        if src.len() < MAGIC.len() {
            return Err(if MAGIC.starts_with(src) {
                Corruption::Truncated
            } else {
                Corruption::BadMagic
            });
        }
        if src[..MAGIC.len()] != MAGIC {
            return Err(Corruption::BadMagic);
        }
        let mut pos = MAGIC.len();
        let version = *src.get(pos).ok_or(Corruption::Truncated)?;
        if version != FRAME_VERSION {
            return Err(Corruption::UnsupportedVersion(version));
        }
        pos += 1;
        let content_size = read_leb128(src, &mut pos)?;
        Ok((Self { content_size }, pos))
    }
}
