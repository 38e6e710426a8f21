//! Whole-file encode / decode entry points.
//!
//! Each call reads the entire source, runs the codec in memory, and only then
//! creates the target, so a failed call never leaves a half-written file
//! behind:
//!
//! - [`encode`] / [`decode`]: path based; `"stdin"` and `"stdout"` select the
//!   standard streams.
//! - [`encode_stream`] / [`decode_stream`]: any `Read` / `Write` pair.
//!
//! All four return a [`Stat`] with the bytes read and written.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::config::LzCfg;
use crate::displaylevel;
use crate::error::Result;
use crate::frame;
use crate::stat::Stat;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

#[inline]
fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_MARK
}

#[inline]
fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == STDOUT_MARK
}

// ---------------------------------------------------------------------------
// Source / target
// ---------------------------------------------------------------------------

fn read_source(path: &Path) -> io::Result<Vec<u8>> {
    if is_stdin(path) {
        displaylevel!(4, "Using stdin for input\n");
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    fs::read(path).map_err(|e| {
        displaylevel!(3, "{}: {}\n", path.display(), e);
        e
    })
}

/// Writes `bytes` to `path`, removing the file again if the write fails.
fn write_target(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if is_stdout(path) {
        displaylevel!(4, "Using stdout for output\n");
        let mut out = io::stdout().lock();
        out.write_all(bytes)?;
        return out.flush();
    }

    let mut f = File::create(path)?;
    let written = f.write_all(bytes).and_then(|()| f.sync_all());
    if let Err(e) = written {
        drop(f);
        let _ = fs::remove_file(path);
        displaylevel!(3, "{}: {}\n", path.display(), e);
        return Err(e);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Path API
// ---------------------------------------------------------------------------

/// Compresses the file at `source` into `target`.
pub fn encode<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q, cfg: &LzCfg) -> Result<Stat> {
    let src = read_source(source.as_ref())?;
    let dst = frame::compress(&src, cfg);
    write_target(target.as_ref(), &dst)?;
    Ok(Stat::new(src.len() as u64, dst.len() as u64))
}

/// Decompresses the file at `source` into `target`.
///
/// The returned `target_size` equals the `source_size` of the encode call
/// that produced the input.
pub fn decode<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q) -> Result<Stat> {
    let src = read_source(source.as_ref())?;
    let dst = frame::decompress(&src)?;
    write_target(target.as_ref(), &dst)?;
    Ok(Stat::new(src.len() as u64, dst.len() as u64))
}

// ---------------------------------------------------------------------------
// Stream API
// ---------------------------------------------------------------------------

/// Compresses everything `reader` yields and writes the frame to `writer`.
pub fn encode_stream<R: Read, W: Write>(mut reader: R, mut writer: W, cfg: &LzCfg) -> Result<Stat> {
    let mut src = Vec::new();
    reader.read_to_end(&mut src)?;
    let dst = frame::compress(&src, cfg);
    writer.write_all(&dst)?;
    writer.flush()?;
    Ok(Stat::new(src.len() as u64, dst.len() as u64))
}

/// Decompresses one frame read from `reader` into `writer`.
pub fn decode_stream<R: Read, W: Write>(mut reader: R, mut writer: W) -> Result<Stat> {
    let mut src = Vec::new();
    reader.read_to_end(&mut src)?;
    let dst = frame::decompress(&src)?;
    writer.write_all(&dst)?;
    writer.flush()?;
    Ok(Stat::new(src.len() as u64, dst.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrzError;

    #[test]
    fn stream_round_trip() {
        let src = b"stream stream stream stream".to_vec();
        let mut packed = Vec::new();
        let enc = encode_stream(&src[..], &mut packed, &LzCfg::default()).unwrap();
        assert_eq!(enc.source_size, src.len() as u64);
        assert_eq!(enc.target_size, packed.len() as u64);

        let mut unpacked = Vec::new();
        let dec = decode_stream(&packed[..], &mut unpacked).unwrap();
        assert_eq!(unpacked, src);
        assert_eq!(dec.target_size, enc.source_size);
    }

    #[test]
    fn corrupt_stream_writes_nothing() {
        let mut out = Vec::new();
        let err = decode_stream(&b"not a frame"[..], &mut out).unwrap_err();
        assert!(matches!(err, OrzError::Corrupt(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode(dir.path().join("absent"), dir.path().join("out"), &LzCfg::default())
            .unwrap_err();
        assert!(matches!(err, OrzError::Io(_)));
        assert!(!dir.path().join("out").exists());
    }
}
