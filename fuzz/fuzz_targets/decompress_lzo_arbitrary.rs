#![no_main]
use libfuzzer_sys::fuzz_target;
use lzdecode::lzo;

fuzz_target!(|data: &[u8]| {
    for cap in [0usize, 4096, data.len().saturating_mul(4).min(1 << 20)] {
        let mut dst = vec![0u8; cap];
        match lzo::decompress(data, &mut dst[..]) {
            Ok(n) => {
                assert!(n <= cap);
                // A valid block always ends with the canonical marker.
                assert!(data.ends_with(&lzo::END_MARKER));
            }
            Err(e) => assert!(e.is_malformed()),
        }
    }

    // Embedded in a larger array with canaries on both sides.
    let mut input = vec![0x55u8; data.len() + 16];
    input[8..8 + data.len()].copy_from_slice(data);
    let mut output = vec![0xAAu8; 4096 + 32];
    if lzo::decompress_at(&input, 8, data.len(), &mut output, 16, 4096).is_ok() {
        assert!(output[..16].iter().all(|&b| b == 0xAA));
    }
    assert!(output[16 + 4096..].iter().all(|&b| b == 0xAA));
});
