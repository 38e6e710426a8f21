//! orz, a lossless LZ compressor.
//!
//! The codec runs in two stages.  The LZ stage ([`lz`]) walks the input with
//! a hash-chain match finder and a two-level lazy parser, producing literal
//! and match tokens.  The entropy stage ([`entropy`]) codes each block of
//! tokens with a pair of canonical Huffman tables.  [`frame`] wraps the
//! blocks with a header, an end mark, and an XXH32 content checksum.
//!
//! Entry points:
//!
//! - [`compress`] / [`decompress`]: in-memory buffers
//! - [`encode`] / [`decode`]: file paths, returning a [`Stat`]
//! - [`encode_stream`] / [`decode_stream`]: any `Read` / `Write` pair
//! - [`abi`]: the same operations over a C ABI

pub mod display;

pub mod abi;
pub mod cli;
pub mod config;
pub mod entropy;
pub mod error;
pub mod file;
pub mod frame;
pub mod lz;
pub mod stat;
pub mod xxhash;

pub use config::{LzCfg, LEVEL_DEFAULT, LEVEL_MAX, MAX_MATCH, MIN_MATCH};
pub use display::{display_level, set_display_level};
pub use error::{Corruption, OrzError, Result};
pub use file::{decode, decode_stream, encode, encode_stream};
pub use stat::Stat;

/// Compresses `src` into a self-contained frame.
pub fn compress(src: &[u8], cfg: &LzCfg) -> Vec<u8> {
    frame::compress(src, cfg)
}

/// Decompresses a frame produced by [`compress`] or [`encode`].
pub fn decompress(src: &[u8]) -> Result<Vec<u8>> {
    Ok(frame::decompress(src)?)
}
