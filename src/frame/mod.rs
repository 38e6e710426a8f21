//! orz frame format: header, blocks, end mark, and content checksum.

pub mod compress;
pub mod decompress;
pub mod header;

pub use compress::{compress, compress_bound};
pub use decompress::decompress;
pub use header::{FrameHeader, FRAME_VERSION, MAGIC};
