//! Block payload packing.
//!
//! A payload holds the literal/length table, the distance table, and then
//! every token of the block:
//!
//! ```text
//! Literal:  litlen_code(byte)
//! Match:    litlen_code(256 + len_slot)  len_extra
//!           dist_code(dist_slot)         dist_extra
//! ```
//!
//! The block header carries the token count, so the payload has no
//! end-of-block symbol.

use super::bits::{BitReader, BitWriter};
use super::huffman::{HuffmanDecoder, HuffmanEncoder};
use crate::config::{MAX_MATCH, MIN_MATCH};
use crate::error::Corruption;
use crate::lz::decode::Reconstructor;
use crate::lz::encode::{
    slot_base, slot_nbits, CodedToken, TokenEncoder, DIST_SYMBOLS, LITERAL_SYMBOLS, LITLEN_SYMBOLS,
};

/// Packs the coded tokens of one block into a payload.
pub fn pack_block(block: &TokenEncoder) -> Vec<u8> {
    let litlen = HuffmanEncoder::from_freqs(block.litlen_freq());
    let dist = HuffmanEncoder::from_freqs(block.dist_freq());

    let mut w = BitWriter::with_capacity(block.len() + 64);
    litlen.write_table(&mut w);
    dist.write_table(&mut w);

    for token in block.coded() {
        match *token {
            CodedToken::Literal(b) => litlen.put(&mut w, b as usize),
            CodedToken::Match { length, distance } => {
                litlen.put(&mut w, LITERAL_SYMBOLS + length.slot as usize);
                w.put(length.extra, length.nbits as u32);
                dist.put(&mut w, distance.slot as usize);
                w.put(distance.extra, distance.nbits as u32);
            }
        }
    }
    w.finish()
}

/// Decodes `token_count` tokens from `payload` straight into `out`.
///
/// The caller has opened the block on `out`; every copy is bounds-checked by
/// the reconstructor before it happens.
pub fn unpack_block(payload: &[u8], token_count: usize, out: &mut Reconstructor) -> Result<(), Corruption> {
    let mut r = BitReader::new(payload);
    let litlen = HuffmanDecoder::read_table(&mut r, LITLEN_SYMBOLS)?;
    let dist = HuffmanDecoder::read_table(&mut r, DIST_SYMBOLS)?;

    for _ in 0..token_count {
        let sym = litlen.decode(&mut r)?;
        if sym < LITERAL_SYMBOLS {
            out.literal(sym as u8)?;
            continue;
        }

        let len_slot = (sym - LITERAL_SYMBOLS) as u8;
        let len_extra = r.get(slot_nbits(len_slot))?;
        let length = (slot_base(len_slot) + len_extra) as usize + MIN_MATCH;
        if length > MAX_MATCH {
            return Err(Corruption::LengthOutOfRange);
        }

        let dist_slot = dist.decode(&mut r)? as u8;
        let dist_extra = r.get(slot_nbits(dist_slot))?;
        let distance = (slot_base(dist_slot) + dist_extra) as usize + 1;

        out.copy_match(distance, length)?;
    }
    r.finish()
}
