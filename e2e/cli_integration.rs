// e2e/cli_integration.rs: the `orz` binary as a black box.
//
// Covers encode/decode dispatch, the stdin/stdout path sentinels, statistics
// output, silent mode, the ORZ_LEVEL override, and usage errors (bad
// sub-command, wrong argument count, out-of-range level).

use std::fs;
use std::path::PathBuf;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Locate the `orz` binary produced by Cargo.
fn orz_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_orz") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("orz");
    p
}

fn orz(args: &[&str]) -> Output {
    Command::new(orz_bin())
        .args(args)
        .env_remove("ORZ_LEVEL")
        .output()
        .expect("failed to spawn orz")
}

/// A TempDir holding ~4 KB of text at `input.txt`.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "Hello, orz!\n".repeat(341)).unwrap();
    (dir, input)
}

fn s(p: &std::path::Path) -> &str {
    p.to_str().unwrap()
}

// ── 1. Round trip ────────────────────────────────────────────────────────────

#[test]
fn encode_decode_round_trip() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("input.orz");
    let restored = dir.path().join("restored.txt");

    let enc = orz(&["encode", s(&input), s(&packed)]);
    assert!(enc.status.success(), "encode failed: {}", String::from_utf8_lossy(&enc.stderr));
    let dec = orz(&["decode", s(&packed), s(&restored)]);
    assert!(dec.status.success(), "decode failed: {}", String::from_utf8_lossy(&dec.stderr));

    assert_eq!(fs::read(&restored).unwrap(), fs::read(&input).unwrap());
    assert!(fs::metadata(&packed).unwrap().len() < fs::metadata(&input).unwrap().len());
}

#[test]
fn statistics_are_printed_unless_silent() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("input.orz");

    let loud = orz(&["encode", "-l", "0", s(&input), s(&packed)]);
    assert!(loud.status.success());
    let stderr = String::from_utf8_lossy(&loud.stderr);
    assert!(stderr.contains("statistics:"), "stderr: {}", stderr);
    assert!(stderr.contains("4092 bytes =>"), "stderr: {}", stderr);

    let quiet = orz(&["encode", "-s", s(&input), s(&packed)]);
    assert!(quiet.status.success());
    assert!(quiet.stderr.is_empty());
}

#[test]
fn explicit_depths_are_accepted() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("input.orz");
    let restored = dir.path().join("restored.txt");

    let enc = orz(&[
        "encode", "--match-depth", "4", "--lazy-depth1", "2", "--lazy-depth2", "1", "-s",
        s(&input), s(&packed),
    ]);
    assert!(enc.status.success());
    assert!(orz(&["decode", "-s", s(&packed), s(&restored)]).status.success());
    assert_eq!(fs::read(&restored).unwrap(), fs::read(&input).unwrap());
}

#[test]
fn env_level_is_honoured() {
    let (dir, input) = make_temp_input();
    let packed = dir.path().join("input.orz");
    let out = Command::new(orz_bin())
        .args(["encode", "-s", s(&input), s(&packed)])
        .env("ORZ_LEVEL", "0")
        .output()
        .unwrap();
    assert!(out.status.success());
}

/// Runs `orz <args>` inside `dir` with `input` on stdin.
fn orz_piped(dir: &std::path::Path, args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(orz_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("ORZ_LEVEL")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn orz");
    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(input).unwrap();
    }
    child.wait_with_output().unwrap()
}

#[test]
fn stdin_stdout_sentinels_round_trip() {
    let dir = TempDir::new().unwrap();
    let original = b"ABABABAB hello hello hello".repeat(50);

    let enc = orz_piped(dir.path(), &["encode", "-s", "stdin", "stdout"], &original);
    assert!(enc.status.success(), "encode failed: {}", String::from_utf8_lossy(&enc.stderr));
    assert!(enc.stdout.starts_with(b"ORZ\x1a"));
    assert!(enc.stdout.len() < original.len());

    let dec = orz_piped(dir.path(), &["decode", "-s", "stdin", "stdout"], &enc.stdout);
    assert!(dec.status.success(), "decode failed: {}", String::from_utf8_lossy(&dec.stderr));
    assert_eq!(dec.stdout, original);

    assert!(!dir.path().join("stdin").exists());
    assert!(!dir.path().join("stdout").exists());
}

// ── 2. Usage errors ──────────────────────────────────────────────────────────

#[test]
fn unknown_subcommand_fails_with_usage() {
    let out = orz(&["squash", "a", "b"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.to_lowercase().contains("usage"), "stderr: {}", stderr);
}

#[test]
fn wrong_argument_count_fails() {
    assert!(!orz(&[]).status.success());
    assert!(!orz(&["encode"]).status.success());
    assert!(!orz(&["encode", "only-input"]).status.success());
    assert!(!orz(&["decode", "a", "b", "c"]).status.success());
}

#[test]
fn level_out_of_range_fails() {
    let (dir, input) = make_temp_input();
    let out = orz(&["encode", "-l", "7", s(&input), s(&dir.path().join("x"))]);
    assert!(!out.status.success());
    assert!(!dir.path().join("x").exists());
}

// ── 3. Runtime errors ────────────────────────────────────────────────────────

#[test]
fn corrupt_input_fails_without_output() {
    let (dir, input) = make_temp_input();
    let restored = dir.path().join("restored.txt");
    let out = orz(&["decode", s(&input), s(&restored)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("decoding failed"));
    assert!(!restored.exists());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let out = orz(&["encode", s(&dir.path().join("nope")), s(&dir.path().join("out"))]);
    assert_eq!(out.status.code(), Some(1));
}
