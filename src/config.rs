//! Engine constants, compression-level presets, and environment overrides.
//!
//! Everything tunable about the codec lives here: the match-length bounds the
//! parser and packer agree on, the window and hash sizing of the match finder,
//! the block granularity of the entropy stage, and the [`LzCfg`] presets the
//! CLI exposes as levels 0–3.

use crate::display_level;

// ─────────────────────────────────────────────────────────────────────────────
// Match-length bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Shortest match worth a token; shorter repeats are emitted as literals.
pub const MIN_MATCH: usize = 4;

/// Longest match a single token can carry.  `MAX_MATCH - MIN_MATCH` must fit
/// the 32 length slots of the literal/length alphabet.
pub const MAX_MATCH: usize = 1 << 16;

// ─────────────────────────────────────────────────────────────────────────────
// Match-finder sizing
// ─────────────────────────────────────────────────────────────────────────────

/// log2 of the largest back-reference window (16 MiB).
pub const WINDOW_LOG: u32 = 24;
pub const WINDOW_SIZE: usize = 1 << WINDOW_LOG;

/// Smallest chain arena allocated, even for tiny inputs.
pub const MIN_WINDOW_SIZE: usize = 1 << 12;

/// Bounds on log2 of the number of hash heads.  The finder picks
/// `window_log - HASH_CHAIN_LOG` inside this range, so an average chain holds
/// about `1 << HASH_CHAIN_LOG` positions whatever the window size.
pub const HASH_LOG_MIN: u32 = 12;
pub const HASH_LOG_MAX: u32 = 20;
pub const HASH_CHAIN_LOG: u32 = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Parser policy
// ─────────────────────────────────────────────────────────────────────────────

/// Matches at least this long are emitted without lazy evaluation.
pub const LAZY_LEN_LIMIT: usize = 128;

/// A match whose distance needs fewer extra bits than this is cheap to encode,
/// so a lookahead match must beat it by one more byte before we defer.
pub const CHEAP_DISTANCE_EXTRA_BITS: u32 = 8;

// ─────────────────────────────────────────────────────────────────────────────
// Entropy stage
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum number of tokens coded with one pair of Huffman tables.
pub const BLOCK_TOKENS: usize = 1 << 20;

/// Longest canonical Huffman code.
pub const HUFFMAN_MAX_CODE_LEN: u8 = 15;

// ─────────────────────────────────────────────────────────────────────────────
// LzCfg and level presets
// ─────────────────────────────────────────────────────────────────────────────

/// The three search budgets that drive the parse stage.
///
/// Values are used as given: the engine never clamps them, and zero simply
/// disables the corresponding search.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzCfg {
    /// Candidate positions examined per match search.
    pub match_depth: usize,
    /// Candidates examined when probing one byte ahead.
    pub lazy_match_depth1: usize,
    /// Candidates examined when probing two bytes ahead.
    pub lazy_match_depth2: usize,
}

impl LzCfg {
    pub const fn new(match_depth: usize, lazy_match_depth1: usize, lazy_match_depth2: usize) -> Self {
        Self {
            match_depth,
            lazy_match_depth1,
            lazy_match_depth2,
        }
    }

    /// Preset for `level`, or `None` above [`LEVEL_MAX`].
    pub fn from_level(level: u32) -> Option<Self> {
        LEVEL_PRESETS.get(level as usize).copied()
    }
}

impl Default for LzCfg {
    fn default() -> Self {
        LEVEL_PRESETS[LEVEL_DEFAULT as usize]
    }
}

pub const LEVEL_MAX: u32 = 3;
pub const LEVEL_DEFAULT: u32 = 3;

/// Level → search budgets.  Index is the level.
pub static LEVEL_PRESETS: [LzCfg; (LEVEL_MAX + 1) as usize] = [
    LzCfg::new( 3,  2,  2), /* 0 */
    LzCfg::new( 8,  6,  5), /* 1 */
    LzCfg::new(21, 17, 13), /* 2 */
    LzCfg::new(55, 44, 34), /* 3 == LEVEL_DEFAULT */
];

// ─────────────────────────────────────────────────────────────────────────────
// Environment override
// ─────────────────────────────────────────────────────────────────────────────

pub const ENV_LEVEL: &str = "ORZ_LEVEL";

/// Default compression level, honouring the `ORZ_LEVEL` environment variable.
pub fn init_level() -> u32 {
    init_level_from(std::env::var(ENV_LEVEL).ok().as_deref())
}

/// Testable core of [`init_level`].
///
/// Returns [`LEVEL_DEFAULT`] when the value is absent, not a number, or above
/// [`LEVEL_MAX`]; the latter two also print a warning at display level 2.
pub fn init_level_from(env_val: Option<&str>) -> u32 {
    if let Some(env) = env_val {
        match env.trim().parse::<u32>() {
            Ok(level) if level <= LEVEL_MAX => return level,
            _ => {
                if display_level() >= 2 {
                    eprintln!(
                        "Ignore environment variable setting {}={}: not a level in 0..={} ",
                        ENV_LEVEL, env, LEVEL_MAX
                    );
                }
            }
        }
    }
    LEVEL_DEFAULT
}
