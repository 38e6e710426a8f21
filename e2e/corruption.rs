// e2e/corruption.rs: damaged frames must fail cleanly.
//
// Every truncation and every single-bit flip of a valid frame is fed to the
// decoder.  It must return an error (or, for a flip the format cannot see,
// the original bytes) and never panic or read out of bounds.

use orz::{compress, decompress, Corruption, LzCfg, OrzError};

fn sample() -> Vec<u8> {
    let mut v = Vec::new();
    for i in 0..60u32 {
        v.extend_from_slice(format!("record {:03}: the quick brown fox {}\n", i, i % 7).as_bytes());
    }
    v
}

#[test]
fn every_truncation_is_rejected() {
    let src = sample();
    let frame = compress(&src, &LzCfg::default());
    for cut in 0..frame.len() {
        match decompress(&frame[..cut]) {
            Err(OrzError::Corrupt(_)) => {}
            other => panic!("cut at {} of {}: {:?}", cut, frame.len(), other.map(|v| v.len())),
        }
    }
}

#[test]
fn every_bit_flip_is_detected_or_harmless() {
    let src = sample();
    let frame = compress(&src, &LzCfg::new(8, 6, 5));
    let mut detected = 0usize;

    for byte in 0..frame.len() {
        for bit in 0..8 {
            let mut damaged = frame.clone();
            damaged[byte] ^= 1 << bit;
            match decompress(&damaged) {
                Ok(out) => assert_eq!(out, src, "flip {}:{} decoded to different bytes", byte, bit),
                Err(e) => {
                    assert!(e.is_corrupt());
                    detected += 1;
                }
            }
        }
    }
    assert!(detected > frame.len() * 7);
}

#[test]
fn specific_corruptions_are_named() {
    let frame = compress(b"named errors, named errors", &LzCfg::default());

    let mut bad_magic = frame.clone();
    bad_magic[0] = b'X';
    assert!(matches!(decompress(&bad_magic), Err(OrzError::Corrupt(Corruption::BadMagic))));

    let mut bad_version = frame.clone();
    bad_version[4] = 2;
    assert!(matches!(
        decompress(&bad_version),
        Err(OrzError::Corrupt(Corruption::UnsupportedVersion(2)))
    ));

    let mut trailing = frame.clone();
    trailing.extend_from_slice(b"extra");
    assert!(matches!(decompress(&trailing), Err(OrzError::Corrupt(Corruption::TrailingData))));

    assert!(matches!(decompress(b""), Err(OrzError::Corrupt(Corruption::Truncated))));
}

#[test]
fn hostile_content_size_does_not_allocate_blindly() {
    // content_size = u64::MAX >> 1, then an immediate end mark
    let mut frame = b"ORZ\x1a\x01".to_vec();
    frame.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]);
    frame.push(0x00);
    frame.extend_from_slice(&[0, 0, 0, 0]);
    assert!(decompress(&frame).is_err());
}

#[test]
fn random_garbage_never_panics() {
    let mut x = 0xC0FF_EE11u32;
    for len in 0..512usize {
        let mut junk: Vec<u8> = (0..len)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                x as u8
            })
            .collect();
        if len > 5 {
            junk[..5].copy_from_slice(b"ORZ\x1a\x01");
        }
        assert!(decompress(&junk).is_err());
    }
}
