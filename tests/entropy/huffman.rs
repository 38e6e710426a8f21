// Canonical Huffman construction and table serialization.

use orz::entropy::bits::{BitReader, BitWriter};
use orz::entropy::huffman::{build_code_lens, HuffmanDecoder, HuffmanEncoder};
use proptest::prelude::*;

fn kraft_sum(lens: &[u8], max_len: u8) -> u64 {
    lens.iter()
        .filter(|&&l| l > 0)
        .map(|&l| 1u64 << (max_len - l))
        .sum()
}

proptest! {
    #[test]
    fn code_lengths_respect_limit_and_kraft(freqs in prop::collection::vec(0u32..100_000, 1..300)) {
        let lens = build_code_lens(&freqs, 15);
        let used = freqs.iter().filter(|&&f| f > 0).count();

        prop_assert_eq!(lens.len(), freqs.len());
        for (f, l) in freqs.iter().zip(&lens) {
            prop_assert_eq!(*f > 0, *l > 0);
            prop_assert!(*l <= 15);
        }
        prop_assert!(kraft_sum(&lens, 15) <= 1 << 15);
        if used >= 2 {
            // full binary tree: the code is complete
            prop_assert_eq!(kraft_sum(&lens, 15), 1 << 15);
        }
    }

    #[test]
    fn tables_and_symbols_decode_back(
        freqs in prop::collection::vec(0u32..50, 288),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..200),
    ) {
        let used: Vec<usize> = (0..freqs.len()).filter(|&s| freqs[s] > 0).collect();
        prop_assume!(!used.is_empty());

        let enc = HuffmanEncoder::from_freqs(&freqs);
        let message: Vec<usize> = picks.iter().map(|i| used[i.index(used.len())]).collect();

        let mut w = BitWriter::new();
        enc.write_table(&mut w);
        for &s in &message {
            enc.put(&mut w, s);
        }
        let bytes = w.finish();

        let mut r = BitReader::new(&bytes);
        let dec = HuffmanDecoder::read_table(&mut r, freqs.len()).unwrap();
        for &s in &message {
            prop_assert_eq!(dec.decode(&mut r).unwrap(), s);
        }
        prop_assert!(r.finish().is_ok());
    }
}

#[test]
fn skewed_counts_stay_within_length_limit() {
    let freqs: Vec<u32> = (0..30u32).map(|i| 1u32 << i).collect();
    let lens = build_code_lens(&freqs, 15);
    assert!(lens.iter().all(|&l| (1..=15).contains(&l)));
    assert_eq!(kraft_sum(&lens, 15), 1 << 15);
}

#[test]
fn empty_table_serializes_and_rejects_lookups() {
    let enc = HuffmanEncoder::from_freqs(&[0; 48]);
    let mut w = BitWriter::new();
    enc.write_table(&mut w);
    let bytes = w.finish();

    let mut r = BitReader::new(&bytes);
    let dec = HuffmanDecoder::read_table(&mut r, 48).unwrap();
    assert!(dec.decode(&mut r).is_err());
}
