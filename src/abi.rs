//! C-ABI shims: the five symbols of `orz.h`.
//!
//! Every entry point returns a heap-allocated [`Stat`] on success and a null
//! pointer on any failure (null argument, non-UTF-8 path, I/O error, corrupt
//! input, output buffer too small).  The caller releases a returned `Stat`
//! exactly once with [`orz_free_stat`].

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use libc::size_t;

use crate::config::LzCfg;
use crate::file;
use crate::frame;
use crate::stat::Stat;

// ─── helpers ─────────────────────────────────────────────────────────────────

#[inline]
fn into_raw(stat: Stat) -> *mut Stat {
    Box::into_raw(Box::new(stat))
}

/// Borrows a NUL-terminated UTF-8 path, or `None` for null / invalid UTF-8.
unsafe fn path_arg<'a>(p: *const c_char) -> Option<&'a str> {
    if p.is_null() {
        return None;
    }
    CStr::from_ptr(p).to_str().ok()
}

/// Copies `bytes` into the caller's buffer when they fit.
unsafe fn copy_out(bytes: &[u8], target: *mut u8, ntarget: size_t) -> bool {
    if bytes.len() > ntarget {
        return false;
    }
    if !bytes.is_empty() {
        ptr::copy_nonoverlapping(bytes.as_ptr(), target, bytes.len());
    }
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// orz_encode_path
//
// Stat* orz_encode_path(const char* source, const char* target,
//                       const LzCfg* cfg);
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `source` and `target` must be NUL-terminated strings and `cfg` must point
/// to a valid `LzCfg`, or be null.
#[no_mangle]
pub unsafe extern "C" fn orz_encode_path(
    source: *const c_char,
    target: *const c_char,
    cfg: *const LzCfg,
) -> *mut Stat {
    let (Some(source), Some(target)) = (path_arg(source), path_arg(target)) else {
        return ptr::null_mut();
    };
    if cfg.is_null() {
        return ptr::null_mut();
    }
    match file::encode(source, target, &*cfg) {
        Ok(stat) => into_raw(stat),
        Err(_) => ptr::null_mut(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// orz_decode_path
//
// Stat* orz_decode_path(const char* source, const char* target);
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `source` and `target` must be NUL-terminated strings, or null.
#[no_mangle]
pub unsafe extern "C" fn orz_decode_path(source: *const c_char, target: *const c_char) -> *mut Stat {
    let (Some(source), Some(target)) = (path_arg(source), path_arg(target)) else {
        return ptr::null_mut();
    };
    match file::decode(source, target) {
        Ok(stat) => into_raw(stat),
        Err(_) => ptr::null_mut(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// orz_encode_buf
//
// Stat* orz_encode_buf(const uint8_t* source, size_t nsource,
//                      uint8_t* target, size_t ntarget,
//                      const LzCfg* cfg);
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `source` must be readable for `nsource` bytes, `target` writable for
/// `ntarget` bytes, and `cfg` must point to a valid `LzCfg`.
#[no_mangle]
pub unsafe extern "C" fn orz_encode_buf(
    source: *const u8,
    nsource: size_t,
    target: *mut u8,
    ntarget: size_t,
    cfg: *const LzCfg,
) -> *mut Stat {
    if source.is_null() || target.is_null() || cfg.is_null() {
        return ptr::null_mut();
    }
    let src = slice::from_raw_parts(source, nsource);
    let dst = frame::compress(src, &*cfg);
    if !copy_out(&dst, target, ntarget) {
        return ptr::null_mut();
    }
    into_raw(Stat::new(src.len() as u64, dst.len() as u64))
}

// ─────────────────────────────────────────────────────────────────────────────
// orz_decode_buf
//
// Stat* orz_decode_buf(const uint8_t* source, size_t nsource,
//                      uint8_t* target, size_t ntarget);
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `source` must be readable for `nsource` bytes and `target` writable for
/// `ntarget` bytes.
#[no_mangle]
pub unsafe extern "C" fn orz_decode_buf(
    source: *const u8,
    nsource: size_t,
    target: *mut u8,
    ntarget: size_t,
) -> *mut Stat {
    if source.is_null() || target.is_null() {
        return ptr::null_mut();
    }
    let src = slice::from_raw_parts(source, nsource);
    let Ok(dst) = frame::decompress(src) else {
        return ptr::null_mut();
    };
    if !copy_out(&dst, target, ntarget) {
        return ptr::null_mut();
    }
    into_raw(Stat::new(src.len() as u64, dst.len() as u64))
}

// ─────────────────────────────────────────────────────────────────────────────
// orz_free_stat
//
// void orz_free_stat(Stat* stat);
// ─────────────────────────────────────────────────────────────────────────────
/// Releases a `Stat` returned by one of the functions above.  Null is a
/// no-op.
///
/// # Safety
/// `stat` must be null or a pointer returned by this library that has not
/// been released yet.
#[no_mangle]
pub unsafe extern "C" fn orz_free_stat(stat: *mut Stat) {
    if !stat.is_null() {
        drop(Box::from_raw(stat));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_round_trip() {
        let src = b"buffer buffer buffer buffer!";
        let cfg = LzCfg::default();
        let mut packed = vec![0u8; frame::compress_bound(src.len())];
        let mut unpacked = vec![0u8; src.len()];
        unsafe {
            let enc = orz_encode_buf(src.as_ptr(), src.len(), packed.as_mut_ptr(), packed.len(), &cfg);
            assert!(!enc.is_null());
            let packed_len = (*enc).target_size as usize;
            assert_eq!((*enc).source_size, src.len() as u64);
            orz_free_stat(enc);

            let dec = orz_decode_buf(packed.as_ptr(), packed_len, unpacked.as_mut_ptr(), unpacked.len());
            assert!(!dec.is_null());
            assert_eq!((*dec).target_size, src.len() as u64);
            orz_free_stat(dec);
        }
        assert_eq!(&unpacked[..], &src[..]);
    }

    #[test]
    fn small_target_buffer_returns_null() {
        let src = [7u8; 100];
        let mut tiny = [0u8; 4];
        let cfg = LzCfg::default();
        let stat = unsafe { orz_encode_buf(src.as_ptr(), src.len(), tiny.as_mut_ptr(), tiny.len(), &cfg) };
        assert!(stat.is_null());
    }

    #[test]
    fn null_arguments_return_null() {
        unsafe {
            assert!(orz_decode_path(ptr::null(), ptr::null()).is_null());
            assert!(orz_encode_buf(ptr::null(), 0, ptr::null_mut(), 0, ptr::null()).is_null());
            orz_free_stat(ptr::null_mut());
        }
    }
}
