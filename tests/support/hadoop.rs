// Builds Hadoop block streams for the stream, file and CLI tests.
//
// Expects `codecs` to be declared next to this module.

#![allow(dead_code)]

use lzdecode::Codec;

/// Splits `data` into blocks of `block_size` bytes, each compressed as chunks
/// of at most `chunk_size` bytes.
pub fn encode_stream(codec: Codec, data: &[u8], block_size: usize, chunk_size: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for block in data.chunks(block_size) {
        out.extend_from_slice(&(block.len() as u32).to_be_bytes());
        for chunk in block.chunks(chunk_size) {
            let compressed = super::codecs::compress_block(codec, chunk);
            out.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
            out.extend_from_slice(&compressed);
        }
    }
    out
}
