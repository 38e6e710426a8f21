//! Error types shared by the engine, the file API, and the C ABI.
//!
//! Two families: [`OrzError::Io`] for the operating system refusing a read or
//! write, and [`OrzError::Corrupt`] for a compressed stream that does not
//! decode.  A corrupt stream is always detected before
//! any out-of-bounds read or copy happens.

use std::fmt;
use std::io;

/// What exactly was wrong with a compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    /// The stream does not start with the frame magic.
    BadMagic,
    /// The frame version byte is not one this build understands.
    UnsupportedVersion(u8),
    /// The stream ended before a field or bit run was complete.
    Truncated,
    /// A variable-length integer ran past its maximum width.
    VarintOverflow,
    /// A serialized Huffman table is malformed or oversubscribed.
    BadHuffmanTable,
    /// The bit stream holds a code that the current table does not assign.
    BadHuffmanCode,
    /// A decoded match length lies outside `MIN_MATCH..=MAX_MATCH`.
    LengthOutOfRange,
    /// A match points further back than the output produced so far.
    DistanceTooFar { distance: u64, available: u64 },
    /// A token would write past the end of its block.
    LengthOverrun,
    /// A block decoded to a different size than its header declares.
    BlockSizeMismatch,
    /// The blocks add up to a different size than the frame header declares.
    ContentSizeMismatch,
    /// The content checksum does not match the decoded bytes.
    ChecksumMismatch,
    /// Bytes follow the end of the frame or the end of a block payload.
    TrailingData,
}

impl Corruption {
    /// Short, stable identifier for diagnostics.
    pub fn error_name(&self) -> &'static str {
        match self {
            Corruption::BadMagic => "ERROR_bad_magic",
            Corruption::UnsupportedVersion(_) => "ERROR_unsupported_version",
            Corruption::Truncated => "ERROR_truncated",
            Corruption::VarintOverflow => "ERROR_varint_overflow",
            Corruption::BadHuffmanTable => "ERROR_bad_huffman_table",
            Corruption::BadHuffmanCode => "ERROR_bad_huffman_code",
            Corruption::LengthOutOfRange => "ERROR_length_out_of_range",
            Corruption::DistanceTooFar { .. } => "ERROR_distance_too_far",
            Corruption::LengthOverrun => "ERROR_length_overrun",
            Corruption::BlockSizeMismatch => "ERROR_block_size_mismatch",
            Corruption::ContentSizeMismatch => "ERROR_content_size_mismatch",
            Corruption::ChecksumMismatch => "ERROR_checksum_mismatch",
            Corruption::TrailingData => "ERROR_trailing_data",
        }
    }
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corruption::UnsupportedVersion(v) => {
                write!(f, "{} (version {})", self.error_name(), v)
            }
            Corruption::DistanceTooFar { distance, available } => write!(
                f,
                "{} (distance {} with {} bytes decoded)",
                self.error_name(),
                distance,
                available
            ),
            _ => f.write_str(self.error_name()),
        }
    }
}

impl std::error::Error for Corruption {}

/// Any failure of an encode or decode call.
#[derive(Debug)]
pub enum OrzError {
    /// Reading the source or writing the target failed.
    Io(io::Error),
    /// The compressed input is not a valid stream.
    Corrupt(Corruption),
}

impl OrzError {
    /// `true` for stream corruption, `false` for I/O failures.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, OrzError::Corrupt(_))
    }
}

impl fmt::Display for OrzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrzError::Io(e) => write!(f, "i/o error: {}", e),
            OrzError::Corrupt(c) => write!(f, "corrupt stream: {}", c),
        }
    }
}

impl std::error::Error for OrzError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrzError::Io(e) => Some(e),
            OrzError::Corrupt(c) => Some(c),
        }
    }
}

impl From<io::Error> for OrzError {
    fn from(e: io::Error) -> Self {
        OrzError::Io(e)
    }
}

impl From<Corruption> for OrzError {
    fn from(c: Corruption) -> Self {
        OrzError::Corrupt(c)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_and_io_are_distinguishable() {
        let c: OrzError = Corruption::Truncated.into();
        let i: OrzError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(c.is_corrupt());
        assert!(!i.is_corrupt());
    }

    #[test]
    fn display_includes_details() {
        let e = OrzError::Corrupt(Corruption::DistanceTooFar {
            distance: 9,
            available: 3,
        });
        let s = e.to_string();
        assert!(s.contains("ERROR_distance_too_far"));
        assert!(s.contains("distance 9"));
    }
}
