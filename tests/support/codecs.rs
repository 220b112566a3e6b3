// Reference encoders for round-trip tests: lz4_flex for LZ4, lzokay for LZO1X.

#![allow(dead_code)]

use lzdecode::Codec;

pub fn compress_lzo(data: &[u8]) -> Vec<u8> {
    lzokay::compress::compress(data).expect("lzokay failed to compress")
}

pub fn compress_block(codec: Codec, data: &[u8]) -> Vec<u8> {
    match codec {
        Codec::Lz4 => lz4_flex::block::compress(data),
        Codec::Lzo => compress_lzo(data),
    }
}
