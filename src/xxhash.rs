//! Content checksum carried at the end of every frame.
//!
//! Thin wrapper around `xxhash-rust`: the frame stores XXH32 with seed 0 of
//! the uncompressed content, little-endian.

pub const CHECKSUM_SEED: u32 = 0;

/// XXH32 of `data` with the frame seed.
#[inline]
pub fn content_checksum(data: &[u8]) -> u32 {
    xxhash_rust::xxh32::xxh32(data, CHECKSUM_SEED)
}
