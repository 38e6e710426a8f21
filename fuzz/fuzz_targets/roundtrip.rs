#![no_main]
use libfuzzer_sys::fuzz_target;

use orz::LzCfg;

fuzz_target!(|input: &[u8]| {
    // First three bytes pick the search budgets; the rest is the payload.
    if input.len() < 3 {
        return;
    }
    let cfg = LzCfg::new(input[0] as usize % 64, input[1] as usize % 64, input[2] as usize % 64);
    let data = &input[3..];

    let compressed = orz::compress(data, &cfg);
    let recovered = match orz::decompress(&compressed) {
        Ok(v) => v,
        Err(e) => panic!(
            "round-trip: self-compressed frame rejected ({} bytes in, {} bytes compressed): {}",
            data.len(),
            compressed.len(),
            e
        ),
    };

    assert_eq!(
        recovered, data,
        "round-trip mismatch: {} bytes in, {} bytes back",
        data.len(),
        recovered.len()
    );
});
