#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must decode or fail with an error, never panic.
    if let Ok(out) = orz::decompress(data) {
        let again = orz::compress(&out, &orz::LzCfg::new(4, 2, 1));
        assert_eq!(orz::decompress(&again).ok().as_deref(), Some(&out[..]));
    }
});
