//! Whole-buffer frame compression.
//!
//! The source is parsed in blocks of at most `BLOCK_TOKENS` tokens.  One
//! match finder spans the whole input, so matches reach back across block
//! boundaries; only the Huffman tables restart with each block.

use super::header::{write_le32, write_leb128, FrameHeader, END_MARK};
use crate::config::{LzCfg, BLOCK_TOKENS};
use crate::displaylevel;
use crate::entropy::pack_block;
use crate::lz::{LazyParser, MatchFinder, Token, TokenEncoder};
use crate::xxhash::content_checksum;

/// Upper bound on the frame size for `src_len` input bytes.
///
/// Incompressible input costs at most 9 bits per literal plus table and
/// header overhead per block.
pub fn compress_bound(src_len: usize) -> usize {
    let blocks = src_len / BLOCK_TOKENS + 1;
    src_len + src_len / 8 + blocks * 1024 + 32
}

/// Compresses `src` into a complete frame.
pub fn compress(src: &[u8], cfg: &LzCfg) -> Vec<u8> {
    let mut dst = Vec::with_capacity(src.len() / 2 + 32);
    FrameHeader {
        content_size: src.len() as u64,
    }
    .write(&mut dst);

    let mut finder = MatchFinder::new(src);
    let parser = LazyParser::new(*cfg);
    let mut tokens: Vec<Token> = Vec::with_capacity(src.len().min(BLOCK_TOKENS));
    let mut coded = TokenEncoder::new();
    let mut pos = 0usize;
    let mut block_no = 0usize;

    while pos < src.len() {
        tokens.clear();
        let start = pos;
        pos = parser.parse_block(&mut finder, src, pos, BLOCK_TOKENS, &mut tokens);

        coded.clear();
        for t in &tokens {
            coded.push(t);
        }
        let payload = pack_block(&coded);

        write_leb128(&mut dst, (pos - start) as u64);
        write_leb128(&mut dst, tokens.len() as u64);
        write_leb128(&mut dst, payload.len() as u64);
        dst.extend_from_slice(&payload);

        block_no += 1;
        displaylevel!(
            4,
            "block {}: {} bytes, {} tokens => {} bytes\n",
            block_no,
            pos - start,
            tokens.len(),
            payload.len()
        );
        displaylevel!(3, "\rencoded {} / {} bytes", pos, src.len());
    }
    if block_no > 0 {
        displaylevel!(3, "\n");
    }

    dst.push(END_MARK);
    write_le32(&mut dst, content_checksum(src));
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::header::MAGIC;

    #[test]
    fn empty_input_is_header_end_and_checksum() {
        let frame = compress(b"", &LzCfg::default());
        assert_eq!(&frame[..4], &MAGIC);
        assert_eq!(frame.len(), 4 + 1 + 1 + 1 + 4);
        assert_eq!(frame[6], END_MARK);
    }

    #[test]
    fn bound_covers_incompressible_input() {
        let mut x = 0x1234_5678u32;
        let src: Vec<u8> = (0..50_000)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                x as u8
            })
            .collect();
        let frame = compress(&src, &LzCfg::default());
        assert!(frame.len() <= compress_bound(src.len()));
    }
}
