//! Entropy stage: bit I/O, canonical Huffman tables, and block packing.

pub mod bits;
pub mod huffman;
pub mod pack;

pub use pack::{pack_block, unpack_block};
