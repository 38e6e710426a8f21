//! Two-level lazy parser.
//!
//! At each position the parser asks the match finder for the best match and
//! then decides whether to take it or to emit one literal and look again.
//! The decision runs through an explicit state machine:
//!
//! ```text
//! AtPosition ──no match──────────────────────────────▶ Emitting(Literal)
//!     │ match, len >= LAZY_LEN_LIMIT ────────────────▶ Emitting(Match)
//!     ▼ match
//! ConsideringDefer1 ──better match at pos+1──────────▶ Emitting(Literal)
//!     ▼
//! ConsideringDefer2 ──better match at pos+2──────────▶ Emitting(Literal)
//!     └──────────────────────────────────────────────▶ Emitting(Match)
//! ```
//!
//! "Better" means at least [`defer_threshold`] bytes long: one byte longer
//! than the current match, plus one more when the current match's distance is
//! cheap to code.  An equal-length lookahead therefore never defers.

use super::encode::slot_extra_bits;
use super::search::MatchProbe;
use super::types::{Match, Token};
use crate::config::{LzCfg, CHEAP_DISTANCE_EXTRA_BITS, LAZY_LEN_LIMIT};

/// What the parser emits at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Literal,
    Match(Match),
}

impl Decision {
    /// Cursor advance after emitting this decision.
    #[inline]
    pub fn advance(&self) -> usize {
        match self {
            Decision::Literal => 1,
            Decision::Match(m) => m.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    AtPosition,
    ConsideringDefer1(Match),
    ConsideringDefer2(Match),
    Emitting(Decision),
}

/// Minimum lookahead match length that makes deferring `m` worthwhile.
#[inline]
pub fn defer_threshold(m: &Match) -> usize {
    let cheap = slot_extra_bits(m.distance - 1) < CHEAP_DISTANCE_EXTRA_BITS;
    m.len() + 1 + cheap as usize
}

pub struct LazyParser {
    cfg: LzCfg,
}

impl LazyParser {
    pub fn new(cfg: LzCfg) -> Self {
        Self { cfg }
    }

    #[inline]
    pub fn cfg(&self) -> &LzCfg {
        &self.cfg
    }

    /// One transition of the decision state machine at `pos`.
    pub fn step<P: MatchProbe>(&self, probe: &mut P, state: ParseState, pos: usize) -> ParseState {
        match state {
            ParseState::AtPosition => match probe.find_match(pos, self.cfg.match_depth) {
                None => ParseState::Emitting(Decision::Literal),
                Some(m) if m.len() >= LAZY_LEN_LIMIT => ParseState::Emitting(Decision::Match(m)),
                Some(m) => ParseState::ConsideringDefer1(m),
            },
            ParseState::ConsideringDefer1(m) => {
                if probe.has_match(pos + 1, defer_threshold(&m), self.cfg.lazy_match_depth1) {
                    ParseState::Emitting(Decision::Literal)
                } else {
                    ParseState::ConsideringDefer2(m)
                }
            }
            ParseState::ConsideringDefer2(m) => {
                if probe.has_match(pos + 2, defer_threshold(&m), self.cfg.lazy_match_depth2) {
                    ParseState::Emitting(Decision::Literal)
                } else {
                    ParseState::Emitting(Decision::Match(m))
                }
            }
            emitting @ ParseState::Emitting(_) => emitting,
        }
    }

    /// Runs the state machine at `pos` until it emits.
    pub fn decide<P: MatchProbe>(&self, probe: &mut P, pos: usize) -> Decision {
        let mut state = ParseState::AtPosition;
        loop {
            state = self.step(probe, state, pos);
            if let ParseState::Emitting(decision) = state {
                return decision;
            }
        }
    }

    /// Parses `src[pos..]` into `out` until the input ends or `max_tokens`
    /// tokens were appended.  Returns the position after the last token.
    pub fn parse_block<P: MatchProbe>(
        &self,
        probe: &mut P,
        src: &[u8],
        mut pos: usize,
        max_tokens: usize,
        out: &mut Vec<Token>,
    ) -> usize {
        let mut emitted = 0usize;
        while pos < src.len() && emitted < max_tokens {
            let decision = self.decide(probe, pos);
            match decision {
                Decision::Literal => out.push(Token::Literal(src[pos])),
                Decision::Match(m) => out.push(m.into()),
            }
            pos += decision.advance();
            emitted += 1;
        }
        pos
    }
}
