//! Whole-buffer frame decompression.
//!
//! Every length field is checked against the bytes actually present and
//! against the sizes declared further up (content size, block size) before
//! any allocation or copy depends on it.

use super::header::{read_le32, read_leb128_usize, FrameHeader, CHECKSUM_SIZE, END_MARK};
use crate::displaylevel;
use crate::entropy::unpack_block;
use crate::error::Corruption;
use crate::lz::Reconstructor;
use crate::xxhash::content_checksum;

/// Preallocation cap: a hostile header cannot make us reserve more than this
/// up front; the buffer still grows as blocks actually decode.
const MAX_PREALLOC: usize = 1 << 26;

/// Decompresses a complete frame.
pub fn decompress(src: &[u8]) -> Result<Vec<u8>, Corruption> {
    let (header, mut pos) = FrameHeader::read(src)?;
    let content_size =
        usize::try_from(header.content_size).map_err(|_| Corruption::ContentSizeMismatch)?;

    let mut out = Reconstructor::with_capacity(content_size.min(MAX_PREALLOC));

    loop {
        if *src.get(pos).ok_or(Corruption::Truncated)? == END_MARK {
            pos += 1;
            break;
        }

        let raw_len = read_leb128_usize(src, &mut pos)?;
        if raw_len > content_size - out.len() {
            return Err(Corruption::ContentSizeMismatch);
        }
        let token_count = read_leb128_usize(src, &mut pos)?;
        if token_count > raw_len {
            return Err(Corruption::BlockSizeMismatch);
        }
        let payload_len = read_leb128_usize(src, &mut pos)?;
        if payload_len > src.len() - pos {
            return Err(Corruption::Truncated);
        }
        let payload = &src[pos..pos + payload_len];
        pos += payload_len;

        out.begin_block(raw_len);
        unpack_block(payload, token_count, &mut out)?;
        out.end_block()?;

        displaylevel!(4, "block: {} tokens => {} bytes\n", token_count, raw_len);
    }

    if out.len() != content_size {
        return Err(Corruption::ContentSizeMismatch);
    }
    if src.len() - pos < CHECKSUM_SIZE {
        return Err(Corruption::Truncated);
    }
    let stored = read_le32(src, pos);
    pos += CHECKSUM_SIZE;
    if pos != src.len() {
        return Err(Corruption::TrailingData);
    }

    let content = out.into_inner();
    if content_checksum(&content) != stored {
        return Err(Corruption::ChecksumMismatch);
    }
    Ok(content)
}
