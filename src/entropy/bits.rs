//! MSB-first bit writer and reader.
//!
//! Bits are packed from the most significant end of each byte.  The final
//! byte is zero-padded.  The reader treats bytes past the end of its input
//! as zeros when peeking, so a Huffman lookup near the end never reads out of
//! bounds; consuming those padding bits is reported as truncation.
//!
//! Small integers in table headers use a bit-level varint: each 2-bit group
//! carries one payload bit (low bit) and a continuation flag (high bit),
//! least significant payload bit first.

use crate::error::Corruption;

/// Widest varint accepted by [`BitReader::get_varint`].
const VARINT_MAX_GROUPS: u32 = 32;

// ─────────────────────────────────────────────────────────────────────────────
// BitWriter
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct BitWriter {
    out: Vec<u8>,
    acc: u64,
    nbits: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            out: Vec::with_capacity(bytes),
            acc: 0,
            nbits: 0,
        }
    }

    /// Appends the low `n` bits of `value`, most significant first.
    #[inline]
    pub fn put(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32);
        if n == 0 {
            return;
        }
        let masked = value as u64 & ((1u64 << n) - 1);
        self.acc = (self.acc << n) | masked;
        self.nbits += n;
        while self.nbits >= 8 {
            self.nbits -= 8;
            self.out.push((self.acc >> self.nbits) as u8);
        }
        self.acc &= (1u64 << self.nbits) - 1;
    }

    pub fn put_varint(&mut self, mut v: u32) {
        loop {
            let bit = v & 1;
            v >>= 1;
            let more = (v != 0) as u32;
            self.put(bit | (more << 1), 2);
            if more == 0 {
                break;
            }
        }
    }

    /// Pads the last byte with zeros and returns the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.nbits > 0 {
            self.out.push((self.acc << (8 - self.nbits)) as u8);
        }
        self.out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BitReader
// ─────────────────────────────────────────────────────────────────────────────

pub struct BitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    /// Unconsumed bits, left-aligned.
    acc: u64,
    nbits: u32,
    consumed: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            acc: 0,
            nbits: 0,
            consumed: 0,
        }
    }

    #[inline]
    fn refill(&mut self) {
        while self.nbits <= 56 {
            let b = self.data.get(self.byte_pos).copied().unwrap_or(0);
            self.byte_pos += 1;
            self.acc |= (b as u64) << (56 - self.nbits);
            self.nbits += 8;
        }
    }

    /// Bits left in the input, excluding zero padding past its end.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.consumed
    }

    /// Next `n` bits without consuming them; bits past the end read as zero.
    #[inline]
    pub fn peek(&mut self, n: u32) -> u32 {
        debug_assert!(n <= 32);
        if n == 0 {
            return 0;
        }
        self.refill();
        (self.acc >> (64 - n)) as u32
    }

    #[inline]
    pub fn skip(&mut self, n: u32) -> Result<(), Corruption> {
        if n as usize > self.remaining() {
            return Err(Corruption::Truncated);
        }
        if n == 0 {
            return Ok(());
        }
        self.refill();
        self.acc <<= n;
        self.nbits -= n;
        self.consumed += n as usize;
        Ok(())
    }

    #[inline]
    pub fn get(&mut self, n: u32) -> Result<u32, Corruption> {
        let v = self.peek(n);
        self.skip(n)?;
        Ok(v)
    }

    pub fn get_varint(&mut self) -> Result<u32, Corruption> {
        let mut v = 0u32;
        for i in 0..VARINT_MAX_GROUPS {
            let g = self.get(2)?;
            v |= (g & 1) << i;
            if g & 2 == 0 {
                return Ok(v);
            }
        }
        Err(Corruption::VarintOverflow)
    }

    /// Checks that only zero padding of the final byte is left.
    pub fn finish(mut self) -> Result<(), Corruption> {
        let left = self.remaining();
        if left >= 8 || self.peek(left as u32) != 0 {
            return Err(Corruption::TrailingData);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_first_packing() {
        let mut w = BitWriter::new();
        w.put(0b1, 1);
        w.put(0b011, 3);
        w.put(0b1111, 4);
        w.put(0b10, 2);
        assert_eq!(w.finish(), vec![0b1011_1111, 0b1000_0000]);
    }

    #[test]
    fn reads_back_mixed_widths() {
        let mut w = BitWriter::new();
        w.put(5, 3);
        w.put(0xABCDE, 20);
        w.put(0, 0);
        w.put(u32::MAX, 32);
        w.put_varint(0);
        w.put_varint(300);
        let bytes = w.finish();

        let mut r = BitReader::new(&bytes);
        assert_eq!(r.get(3).unwrap(), 5);
        assert_eq!(r.get(20).unwrap(), 0xABCDE);
        assert_eq!(r.get(32).unwrap(), u32::MAX);
        assert_eq!(r.get_varint().unwrap(), 0);
        assert_eq!(r.get_varint().unwrap(), 300);
        r.finish().unwrap();
    }

    #[test]
    fn reading_past_end_is_truncation() {
        let mut r = BitReader::new(&[0xFF]);
        assert_eq!(r.peek(16), 0xFF00);
        assert_eq!(r.get(9), Err(Corruption::Truncated));
    }

    #[test]
    fn endless_varint_overflows() {
        let data = [0xFFu8; 16];
        let mut r = BitReader::new(&data);
        assert_eq!(r.get_varint(), Err(Corruption::VarintOverflow));
    }

    #[test]
    fn leftover_byte_is_trailing_data() {
        let r = BitReader::new(&[0x00]);
        assert_eq!(r.finish(), Err(Corruption::TrailingData));
    }

    #[test]
    fn nonzero_padding_is_trailing_data() {
        let mut r = BitReader::new(&[0b1010_0001]);
        r.get(4).unwrap();
        assert_eq!(r.finish(), Err(Corruption::TrailingData));
    }
}
