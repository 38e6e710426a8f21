// Block packing over real parses.

use orz::entropy::{pack_block, unpack_block};
use orz::lz::{parse, Reconstructor, Token, TokenEncoder};
use orz::{Corruption, LzCfg};

fn unpack(payload: &[u8], tokens: &[Token]) -> Result<Vec<u8>, Corruption> {
    let total = tokens.iter().map(Token::output_len).sum();
    let mut out = Reconstructor::new();
    out.begin_block(total);
    unpack_block(payload, tokens.len(), &mut out)?;
    out.end_block()?;
    Ok(out.into_inner())
}

#[test]
fn parsed_text_packs_and_unpacks() {
    let src: Vec<u8> = b"to be or not to be, that is the question; "
        .iter()
        .cycle()
        .take(5000)
        .copied()
        .collect();
    let tokens = parse(&src, &LzCfg::default());
    let payload = pack_block(&TokenEncoder::from_tokens(&tokens));

    assert!(payload.len() < src.len() / 10);
    assert_eq!(unpack(&payload, &tokens).unwrap(), src);
}

#[test]
fn all_byte_values_as_literals() {
    let src: Vec<u8> = (0..=255u8).collect();
    let tokens = parse(&src, &LzCfg::default());
    assert_eq!(tokens.len(), 256);
    let payload = pack_block(&TokenEncoder::from_tokens(&tokens));
    assert_eq!(unpack(&payload, &tokens).unwrap(), src);
}

#[test]
fn truncated_payload_is_rejected() {
    let src = b"abcabcabcabcabcabcabcabc xyz xyz xyz xyz";
    let tokens = parse(src, &LzCfg::default());
    let payload = pack_block(&TokenEncoder::from_tokens(&tokens));
    for cut in 0..payload.len() {
        assert!(unpack(&payload[..cut], &tokens).is_err(), "cut at {}", cut);
    }
}
