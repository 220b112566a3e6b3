#![no_main]
use libfuzzer_sys::fuzz_target;
use lzdecode::{lz4, SlackBuffer};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must only ever produce Ok or MalformedInput.

    for cap in [0usize, 4096, data.len(), data.len().saturating_mul(255).min(1 << 20)] {
        let mut dst = vec![0u8; cap];
        if let Err(e) = lz4::decompress(data, &mut dst[..]) {
            assert!(e.is_malformed());
        }
    }

    // Headroom on both sides enables the wide-copy paths; the logical limits
    // must still hold.
    let mut padded = data.to_vec();
    padded.resize(data.len() + 8, 0xEE);
    let Ok(input) = SlackBuffer::new(&padded[..], data.len()) else {
        return;
    };
    let mut output = vec![0u8; 4096 + 8];
    let limited = {
        let Ok(mut region) = SlackBuffer::new(&mut output[..], 4096) else {
            return;
        };
        lz4::decompress(&input, &mut region)
    };

    // Same answer as the exact-size path.
    let mut exact = vec![0u8; 4096];
    let plain = lz4::decompress(data, &mut exact[..]);
    assert_eq!(limited.is_ok(), plain.is_ok());
    if let (Ok(a), Ok(b)) = (limited, plain) {
        assert_eq!(a, b);
        assert_eq!(&output[..a], &exact[..b]);
    }
});
