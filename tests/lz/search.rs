// Match finder: candidate validity, depth monotonicity, window bounds.
//
// Coverage:
//   - every reported match is a real repeat with 1 <= distance <= position
//   - a deeper search never returns a shorter match at the same position
//   - has_match agrees with find_match at the same depth
//   - long runs are capped at MAX_MATCH
//   - far repeats in random data stay reachable at the default depth

use orz::lz::{MatchFinder, MatchProbe};
use orz::{MAX_MATCH, MIN_MATCH};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Repetitive text with variation: words from a small vocabulary picked by
/// a fixed xorshift sequence.
fn sample_text(size: usize) -> Vec<u8> {
    const WORDS: &[&[u8]] = &[b"alpha ", b"beta ", b"gamma ", b"delta ", b"alphabet ", b"bet ", b"ma "];
    let mut x = 0x2545_F491u32;
    let mut out = Vec::with_capacity(size + 16);
    while out.len() < size {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        out.extend_from_slice(WORDS[x as usize % WORDS.len()]);
    }
    out.truncate(size);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Validity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reported_matches_are_real_repeats() {
    let src = sample_text(8 * 1024);
    let mut mf = MatchFinder::new(&src);
    let mut found = 0usize;

    for pos in 0..src.len() {
        if let Some(m) = mf.find_match(pos, 16) {
            let d = m.distance as usize;
            let len = m.length as usize;
            assert!(d >= 1 && d <= pos, "distance {} at position {}", d, pos);
            assert!(len >= MIN_MATCH);
            assert!(pos + len <= src.len());
            assert_eq!(src[pos..pos + len], src[pos - d..pos - d + len]);
            found += 1;
        }
    }
    assert!(found > 1000, "text sample should be full of repeats");
}

#[test]
fn first_occurrence_never_matches() {
    let src = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut mf = MatchFinder::new(src);
    assert!((0..src.len()).all(|pos| mf.find_match(pos, 64).is_none()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Depth
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn deeper_search_is_never_worse() {
    let src = sample_text(16 * 1024);
    let mut shallow = MatchFinder::new(&src);
    let mut deep = MatchFinder::new(&src);
    let mut strictly_better = 0usize;

    for pos in 0..src.len() {
        let a = shallow.find_match(pos, 2).map_or(0, |m| m.length);
        let b = deep.find_match(pos, 32).map_or(0, |m| m.length);
        assert!(b >= a, "depth 32 found {} < depth 2 found {} at {}", b, a, pos);
        if b > a {
            strictly_better += 1;
        }
    }
    assert!(strictly_better > 0);
}

#[test]
fn has_match_agrees_with_find_match() {
    let src = sample_text(4 * 1024);
    let mut finder = MatchFinder::new(&src);
    let mut prober = MatchFinder::new(&src);

    for pos in 0..src.len() {
        let best = finder.find_match(pos, 8).map_or(0, |m| m.length as usize);
        if best >= MIN_MATCH {
            assert!(prober.has_match(pos, best, 8));
            assert!(!prober.has_match(pos, best + 1, 8));
        } else {
            assert!(!prober.has_match(pos, MIN_MATCH, 8));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Limits
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn long_run_is_capped_at_max_match() {
    let src = vec![0x5Au8; MAX_MATCH * 2 + 10];
    let mut mf = MatchFinder::new(&src);
    assert!(mf.find_match(0, 4).is_none());
    let m = mf.find_match(1, 4).unwrap();
    assert_eq!(m.distance, 1);
    assert_eq!(m.length as usize, MAX_MATCH);
}

#[test]
fn small_input_gets_minimum_window() {
    let mf = MatchFinder::new(b"tiny");
    assert_eq!(mf.max_distance(), orz::config::MIN_WINDOW_SIZE - 1);
}

/// A repeat near the far edge of a large window stays within reach of the
/// highest preset's search budget on incompressible data.
#[test]
fn far_repeat_in_random_data_is_found() {
    let size = 1usize << 22;
    let mut x = 0x9E37_79B9u32;
    let mut src: Vec<u8> = (0..size)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 24) as u8
        })
        .collect();
    let (head, tail) = src.split_at_mut(size - 64);
    tail.copy_from_slice(&head[..64]);

    let depth = orz::LzCfg::default().match_depth;
    let mut mf = MatchFinder::new(&src);
    let m = mf.find_match(size - 64, depth).expect("far repeat reachable");
    assert_eq!(m.distance as usize, size - 64);
    assert_eq!(m.length, 64);
}
