// Reconstructor: overlapping copies and bounds checks.

use orz::lz::{replay, Reconstructor, Token};
use orz::Corruption;

#[test]
fn overlapping_copy_repeats_period() {
    for period in 1..=5usize {
        let mut tokens: Vec<Token> = (0..period as u8).map(|b| Token::Literal(b'a' + b)).collect();
        tokens.push(Token::Match { length: 23, distance: period as u32 });
        let out = replay(&tokens).unwrap();
        assert_eq!(out.len(), period + 23);
        for i in period..out.len() {
            assert_eq!(out[i], out[i - period], "period {} index {}", period, i);
        }
    }
}

#[test]
fn eight_a_from_one_literal() {
    let out = replay(&[Token::Literal(b'A'), Token::Match { length: 7, distance: 1 }]).unwrap();
    assert_eq!(out, b"AAAAAAAA");
}

#[test]
fn match_before_any_output_is_corrupt() {
    let err = replay(&[Token::Match { length: 4, distance: 1 }]).unwrap_err();
    assert_eq!(err, Corruption::DistanceTooFar { distance: 1, available: 0 });
}

#[test]
fn zero_distance_is_corrupt() {
    let mut r = Reconstructor::new();
    r.begin_block(8);
    r.literal(1).unwrap();
    assert!(matches!(r.copy_match(0, 4), Err(Corruption::DistanceTooFar { .. })));
}

#[test]
fn literal_past_block_end_is_corrupt() {
    let mut r = Reconstructor::new();
    r.begin_block(1);
    r.literal(1).unwrap();
    assert_eq!(r.literal(2), Err(Corruption::LengthOverrun));
    r.end_block().unwrap();
    assert_eq!(r.into_inner(), vec![1]);
}
