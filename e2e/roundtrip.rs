// e2e/roundtrip.rs: in-memory round trips through the public API.
//
// Covers empty, single-byte, repetitive, random, and multi-block inputs, the
// zero-depth configuration, and arbitrary data under arbitrary budgets.

use orz::config::BLOCK_TOKENS;
use orz::{compress, decompress, LzCfg, LEVEL_MAX};
use proptest::prelude::*;

fn xorshift_bytes(n: usize, mut x: u32) -> Vec<u8> {
    (0..n)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 24) as u8
        })
        .collect()
}

fn assert_round_trip(src: &[u8], cfg: &LzCfg) -> usize {
    let packed = compress(src, cfg);
    let unpacked = decompress(&packed).expect("self-compressed frame must decode");
    assert_eq!(unpacked.len(), src.len());
    assert!(unpacked == src, "round-trip mismatch for {} bytes", src.len());
    packed.len()
}

// ── 1. Edge-sized inputs ─────────────────────────────────────────────────────

#[test]
fn empty_input() {
    for level in 0..=LEVEL_MAX {
        assert_round_trip(b"", &LzCfg::from_level(level).unwrap());
    }
}

#[test]
fn single_byte() {
    for b in [0u8, 0x7F, 0xFF] {
        assert_round_trip(&[b], &LzCfg::default());
    }
}

#[test]
fn shorter_than_min_match() {
    assert_round_trip(b"abc", &LzCfg::default());
    assert_round_trip(b"aaaa", &LzCfg::default());
}

// ── 2. Content shapes ────────────────────────────────────────────────────────

#[test]
fn repetitive_input_compresses_well() {
    let src: Vec<u8> = b"0123456789".iter().cycle().take(100_000).copied().collect();
    let size = assert_round_trip(&src, &LzCfg::default());
    assert!(size < 1_000, "repetitive input compressed to {} bytes", size);
}

#[test]
fn single_byte_run_uses_overlapping_copies() {
    let src = vec![b'A'; 70_000];
    let size = assert_round_trip(&src, &LzCfg::new(4, 2, 1));
    assert!(size < 200);
}

#[test]
fn random_input_may_expand_but_round_trips() {
    let src = xorshift_bytes(64 * 1024, 0xDEAD_BEEF);
    let size = assert_round_trip(&src, &LzCfg::default());
    assert!(size > src.len() * 9 / 10);
}

#[test]
fn zero_depths_still_round_trip() {
    let src: Vec<u8> = b"zero depth means no search at all. "
        .iter()
        .cycle()
        .take(10_000)
        .copied()
        .collect();
    let literal_only = assert_round_trip(&src, &LzCfg::new(0, 0, 0));
    let searched = assert_round_trip(&src, &LzCfg::default());
    assert!(searched < literal_only);
}

#[test]
fn input_spanning_several_blocks() {
    // Random bytes produce one literal token per byte.
    let src = xorshift_bytes(BLOCK_TOKENS + BLOCK_TOKENS / 4, 7);
    assert_round_trip(&src, &LzCfg::from_level(0).unwrap());
}

#[test]
fn matches_reach_across_block_boundaries() {
    let cfg = LzCfg::from_level(0).unwrap();
    let head = xorshift_bytes(BLOCK_TOKENS + 1000, 99);
    let mut src = head.clone();
    src.extend_from_slice(&head[head.len() - 4096..]);

    let head_size = compress(&head, &cfg).len();
    let size = assert_round_trip(&src, &cfg);
    // The repeated tail costs a few tokens, not 4 KiB of literals.
    assert!(size < head_size + 200, "{} vs {}", size, head_size);
}

// ── 3. Properties ────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arbitrary_bytes_round_trip(
        data in prop::collection::vec(any::<u8>(), 0..4096),
        d0 in 0usize..40,
        d1 in 0usize..40,
        d2 in 0usize..40,
    ) {
        let packed = compress(&data, &LzCfg::new(d0, d1, d2));
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn low_entropy_bytes_round_trip(
        data in prop::collection::vec(0u8..4, 0..8192),
        level in 0u32..=LEVEL_MAX,
    ) {
        let packed = compress(&data, &LzCfg::from_level(level).unwrap());
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }
}
