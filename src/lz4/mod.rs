//! LZ4 raw block decoding.
//!
//! This module contains the LZ4 block-format decode loop and its public entry
//! points.  Frames, checksums and dictionaries are not part of the raw block
//! format and are not handled here.

pub mod decompress_api;
pub(crate) mod decompress_core;

pub use decompress_api::{decompress, decompress_at, decompress_to_vec, max_compressed_length};
pub use decompress_core::MINMATCH;
