#![no_main]
use std::io::Read;

use libfuzzer_sys::fuzz_target;
use lzdecode::io::BlockStreamReader;
use lzdecode::Codec;

fuzz_target!(|data: &[u8]| {
    // Small chunk limit keeps allocations bounded for hostile length fields.
    for codec in Codec::ALL {
        let mut out = Vec::new();
        let _ = BlockStreamReader::with_max_chunk_size(data, codec, 64 * 1024)
            .take(16 << 20)
            .read_to_end(&mut out);
    }
});
