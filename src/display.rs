//! Notification level and stderr display helpers.
//!
//! A single process-wide atomic decides how chatty the library and the CLI
//! are:
//!
//! | level | output                                    |
//! |-------|-------------------------------------------|
//! | 0     | nothing                                   |
//! | 1     | errors                                    |
//! | 2     | results and warnings (CLI default)        |
//! | 3     | per-block progress                        |
//! | 4+    | verbose internals                         |
//!
//! The library default is 1 so embedding callers only hear about failures.

use std::sync::atomic::{AtomicU32, Ordering};

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(1);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::display::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
