//! Size statistics returned by every encode and decode call.

/// Byte counts of one encode or decode call.
///
/// `source_size` is the number of bytes read and `target_size` the number of
/// bytes written.  A `Stat` has exactly one owner: it is not `Clone`, so the
/// Rust side releases it once by dropping it.  Over the C ABI the same
/// structure travels as a heap pointer released by [`crate::abi::orz_free_stat`].
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub struct Stat {
    pub source_size: u64,
    pub target_size: u64,
}

impl Stat {
    pub fn new(source_size: u64, target_size: u64) -> Self {
        Self {
            source_size,
            target_size,
        }
    }

    /// `target_size / source_size` as a percentage; 0 for an empty source.
    pub fn ratio_percent(&self) -> f64 {
        if self.source_size == 0 {
            return 0.0;
        }
        self.target_size as f64 * 100.0 / self.source_size as f64
    }
}
