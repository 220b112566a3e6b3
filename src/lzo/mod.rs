//! LZO1X raw block decoding.

pub mod decompress_api;
pub(crate) mod decompress_core;

pub use decompress_api::{decompress, decompress_at, decompress_to_vec, max_compressed_length};
pub use decompress_core::END_MARKER;
