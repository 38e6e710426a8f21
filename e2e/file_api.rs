//! E2E suite: path and stream API.
//!
//! Validates `encode` / `decode` against real files in a temporary directory
//! and `encode_stream` / `decode_stream` over in-memory cursors:
//! size accounting in the returned `Stat`, target creation rules, and error
//! classification.

use std::fs;
use std::io::Cursor;

use orz::{decode, decode_stream, encode, encode_stream, LzCfg, OrzError, Stat};
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
    let p = dir.path().join(name);
    fs::write(&p, data).unwrap();
    p
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: ABABABAB with (4, 2, 1)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn alternating_pattern_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in.txt", b"ABABABAB");
    let packed = dir.path().join("in.orz");
    let output = dir.path().join("out.txt");

    let enc = encode(&input, &packed, &LzCfg::new(4, 2, 1)).unwrap();
    assert_eq!(enc.source_size, 8);
    assert_eq!(enc.target_size, fs::metadata(&packed).unwrap().len());

    let dec = decode(&packed, &output).unwrap();
    assert_eq!(dec.target_size, 8);
    assert_eq!(dec.source_size, enc.target_size);
    assert_eq!(fs::read(&output).unwrap(), b"ABABABAB");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: size accounting on larger inputs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stat_matches_file_sizes() {
    let dir = TempDir::new().unwrap();
    let data: Vec<u8> = b"size accounting, size accounting! "
        .iter()
        .cycle()
        .take(200_000)
        .copied()
        .collect();
    let input = write_input(&dir, "big.txt", &data);
    let packed = dir.path().join("big.orz");
    let output = dir.path().join("big.out");

    let enc = encode(&input, &packed, &LzCfg::default()).unwrap();
    assert_eq!(
        enc,
        Stat::new(data.len() as u64, fs::metadata(&packed).unwrap().len())
    );
    assert!(enc.target_size < enc.source_size / 20);

    let dec = decode(&packed, &output).unwrap();
    assert_eq!(dec, Stat::new(enc.target_size, enc.source_size));
    assert_eq!(fs::read(&output).unwrap(), data);
}

#[test]
fn empty_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "empty", b"");
    let packed = dir.path().join("empty.orz");
    let output = dir.path().join("empty.out");

    let enc = encode(&input, &packed, &LzCfg::default()).unwrap();
    assert_eq!(enc.source_size, 0);
    assert!(enc.target_size > 0);

    let dec = decode(&packed, &output).unwrap();
    assert_eq!(dec.target_size, 0);
    assert!(fs::read(&output).unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: failures leave no target behind
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn corrupt_input_creates_no_target() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "junk.orz", b"definitely not an orz frame");
    let output = dir.path().join("never.txt");

    let err = decode(&input, &output).unwrap_err();
    assert!(err.is_corrupt(), "got {}", err);
    assert!(!output.exists());
}

#[test]
fn missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = decode(dir.path().join("nope.orz"), dir.path().join("out")).unwrap_err();
    assert!(matches!(err, OrzError::Io(_)));
}

#[test]
fn unwritable_target_is_io_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in", b"payload");
    let target = dir.path().join("missing-dir").join("out.orz");
    let err = encode(&input, &target, &LzCfg::default()).unwrap_err();
    assert!(matches!(err, OrzError::Io(_)));
}

#[test]
fn existing_target_is_replaced() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "in", b"new content new content");
    let packed = dir.path().join("in.orz");
    let output = write_input(&dir, "out", &[0xEE; 4096]);

    encode(&input, &packed, &LzCfg::default()).unwrap();
    decode(&packed, &output).unwrap();
    assert_eq!(fs::read(&output).unwrap(), b"new content new content");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: stream API
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stream_api_round_trip() {
    let original: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();

    let mut packed = Cursor::new(Vec::new());
    let enc = encode_stream(Cursor::new(&original), &mut packed, &LzCfg::new(8, 6, 5)).unwrap();
    let packed = packed.into_inner();
    assert_eq!(enc.target_size, packed.len() as u64);

    let mut out = Vec::new();
    let dec = decode_stream(Cursor::new(&packed), &mut out).unwrap();
    assert_eq!(dec.target_size, original.len() as u64);
    assert_eq!(out, original);
}

#[test]
fn stream_and_path_produce_identical_frames() {
    let dir = TempDir::new().unwrap();
    let data = b"identical identical identical frames".to_vec();
    let input = write_input(&dir, "in", &data);
    let packed = dir.path().join("in.orz");
    encode(&input, &packed, &LzCfg::default()).unwrap();

    let mut streamed = Vec::new();
    encode_stream(&data[..], &mut streamed, &LzCfg::default()).unwrap();
    assert_eq!(fs::read(&packed).unwrap(), streamed);
}
