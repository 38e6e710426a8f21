// e2e/abi.rs: the exported C symbols, called the way a C program would.

use std::ffi::CString;
use std::fs;
use std::ptr;

use orz::abi::{orz_decode_buf, orz_decode_path, orz_encode_buf, orz_encode_path, orz_free_stat};
use orz::frame::compress_bound;
use orz::LzCfg;
use tempfile::TempDir;

fn c_path(p: &std::path::Path) -> CString {
    CString::new(p.to_str().unwrap()).unwrap()
}

#[test]
fn path_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    let packed = dir.path().join("in.orz");
    let output = dir.path().join("out.txt");
    let data = b"c abi round trip, c abi round trip, c abi round trip".to_vec();
    fs::write(&input, &data).unwrap();

    let cfg = LzCfg::new(48, 32, 16);
    unsafe {
        let enc = orz_encode_path(c_path(&input).as_ptr(), c_path(&packed).as_ptr(), &cfg);
        assert!(!enc.is_null());
        assert_eq!((*enc).source_size, data.len() as u64);
        orz_free_stat(enc);

        let dec = orz_decode_path(c_path(&packed).as_ptr(), c_path(&output).as_ptr());
        assert!(!dec.is_null());
        assert_eq!((*dec).target_size, data.len() as u64);
        orz_free_stat(dec);
    }
    assert_eq!(fs::read(&output).unwrap(), data);
}

#[test]
fn failures_return_null() {
    let dir = TempDir::new().unwrap();
    let missing = c_path(&dir.path().join("missing"));
    let out = c_path(&dir.path().join("out"));
    let cfg = LzCfg::default();
    unsafe {
        assert!(orz_encode_path(missing.as_ptr(), out.as_ptr(), &cfg).is_null());
        assert!(orz_encode_path(missing.as_ptr(), out.as_ptr(), ptr::null()).is_null());
        assert!(orz_decode_path(missing.as_ptr(), ptr::null()).is_null());

        let junk = b"not a frame";
        let mut target = [0u8; 64];
        assert!(orz_decode_buf(junk.as_ptr(), junk.len(), target.as_mut_ptr(), target.len()).is_null());

        assert!(orz_encode_buf(ptr::null(), 0, target.as_mut_ptr(), target.len(), &cfg).is_null());
        assert!(orz_encode_buf(junk.as_ptr(), junk.len(), ptr::null_mut(), 64, &cfg).is_null());
        assert!(orz_encode_buf(junk.as_ptr(), junk.len(), target.as_mut_ptr(), 64, ptr::null()).is_null());
        assert!(orz_decode_buf(ptr::null(), 0, target.as_mut_ptr(), target.len()).is_null());
        assert!(orz_decode_buf(junk.as_ptr(), junk.len(), ptr::null_mut(), 64).is_null());
    }
}

#[test]
fn buffer_round_trip_and_capacity() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i * 31 % 97) as u8).collect();
    let cfg = LzCfg::default();
    let mut packed = vec![0u8; compress_bound(data.len())];
    let mut out = vec![0u8; data.len()];
    unsafe {
        let enc = orz_encode_buf(data.as_ptr(), data.len(), packed.as_mut_ptr(), packed.len(), &cfg);
        assert!(!enc.is_null());
        let n = (*enc).target_size as usize;
        orz_free_stat(enc);

        // one byte short of the decoded size
        let short = orz_decode_buf(packed.as_ptr(), n, out.as_mut_ptr(), data.len() - 1);
        assert!(short.is_null());

        let dec = orz_decode_buf(packed.as_ptr(), n, out.as_mut_ptr(), out.len());
        assert!(!dec.is_null());
        assert_eq!((*dec).source_size, n as u64);
        orz_free_stat(dec);
    }
    assert_eq!(out, data);
}

#[test]
fn free_accepts_null() {
    unsafe { orz_free_stat(ptr::null_mut()) };
}
