//! LZ stage: match finding, lazy parsing, token coding, and reconstruction.
//!
//! - [`types`] : `Match`, `Token`, hashing and prefix comparison helpers
//! - [`search`]: hash-chain `MatchFinder` and the `MatchProbe` trait
//! - [`lazy`]  : two-level lazy `LazyParser`
//! - [`encode`]: slot coding and the block `TokenEncoder`
//! - [`decode`]: `Reconstructor` replaying tokens into the output

pub mod decode;
pub mod encode;
pub mod lazy;
pub mod search;
pub mod types;

pub use decode::{replay, Reconstructor};
pub use encode::{CodedToken, SlotCode, TokenEncoder};
pub use lazy::{defer_threshold, Decision, LazyParser, ParseState};
pub use search::{MatchFinder, MatchProbe};
pub use types::{Match, Token};

use crate::config::LzCfg;

/// Parses all of `src` into tokens with the given search budgets.
pub fn parse(src: &[u8], cfg: &LzCfg) -> Vec<Token> {
    let mut finder = MatchFinder::new(src);
    let parser = LazyParser::new(*cfg);
    let mut tokens = Vec::new();
    parser.parse_block(&mut finder, src, 0, usize::MAX, &mut tokens);
    tokens
}
