// Lazy parser over the real match finder.
//
// Coverage:
//   - token streams replay to the source for every preset
//   - zero depths degrade to an all-literal parse
//   - a longer match one byte ahead makes the parser defer
//   - the "ABABABAB" scenario with (4, 2, 1)

use orz::lz::{parse, replay, Token};
use orz::{LzCfg, LEVEL_MAX};

fn text() -> Vec<u8> {
    let mut v = Vec::new();
    for i in 0..200u32 {
        v.extend_from_slice(format!("line {} of the lazy parser test, value {}\n", i % 17, i * 7 % 13).as_bytes());
    }
    v
}

#[test]
fn every_level_replays_exactly() {
    let src = text();
    for level in 0..=LEVEL_MAX {
        let cfg = LzCfg::from_level(level).unwrap();
        let tokens = parse(&src, &cfg);
        assert_eq!(replay(&tokens).unwrap(), src, "level {}", level);
        assert!(tokens.len() < src.len() / 2, "level {} barely compressed", level);
    }
}

#[test]
fn zero_depths_emit_only_literals() {
    let src = text();
    let tokens = parse(&src, &LzCfg::new(0, 0, 0));
    assert_eq!(tokens.len(), src.len());
    assert!(tokens.iter().all(|t| matches!(t, Token::Literal(_))));
    assert_eq!(replay(&tokens).unwrap(), src);
}

#[test]
fn alternating_pattern_with_small_budgets() {
    let tokens = parse(b"ABABABAB", &LzCfg::new(4, 2, 1));
    assert_eq!(
        tokens,
        vec![
            Token::Literal(b'A'),
            Token::Literal(b'B'),
            Token::Match { length: 6, distance: 2 },
        ]
    );
    assert_eq!(replay(&tokens).unwrap(), b"ABABABAB");
}

#[test]
fn longer_match_one_ahead_is_preferred() {
    // At 13 "abcd" repeats from 8 (4 bytes); at 14 "bcdefgh" repeats from 0.
    let src = b"bcdefgh.abcd-abcdefgh";

    let lazy = parse(src, &LzCfg::new(8, 8, 8));
    assert_eq!(lazy[13], Token::Literal(b'a'));
    assert_eq!(lazy[14], Token::Match { length: 7, distance: 14 });

    let greedy = parse(src, &LzCfg::new(8, 0, 0));
    assert_eq!(greedy[13], Token::Match { length: 4, distance: 5 });

    assert_eq!(replay(&lazy).unwrap(), src);
    assert_eq!(replay(&greedy).unwrap(), src);
}

#[test]
fn empty_and_tiny_inputs() {
    assert!(parse(b"", &LzCfg::default()).is_empty());
    assert_eq!(parse(b"z", &LzCfg::default()), vec![Token::Literal(b'z')]);
    assert_eq!(parse(b"aaa", &LzCfg::default()).len(), 3);
}
