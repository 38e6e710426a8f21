#[path = "entropy/huffman.rs"]
mod huffman;
#[path = "entropy/pack.rs"]
mod pack;
