//! Stream and file I/O around the block decoders.
//!
//! This module assembles the framing reader and the file-level entry points
//! used by the `lzdecode` binary and by library users that hold whole streams
//! rather than single blocks.

pub mod block_stream;
pub mod decompress_dispatch;
pub mod file_io;
pub mod prefs;

// ── Core type re-exports ──────────────────────────────────────────────────────
pub use block_stream::BlockStreamReader;
pub use prefs::{InputLayout, Prefs};

// ── Special I/O sentinels ─────────────────────────────────────────────────────
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ── Decompression public API ──────────────────────────────────────────────────
/// Decode a Hadoop block stream from a reader.
pub use decompress_dispatch::decode_block_stream;

/// Decode a reader holding one raw block.
pub use decompress_dispatch::decode_raw_block;

/// Decode a single file.
pub use decompress_dispatch::decompress_filename;

/// Decode many files, in parallel when writing next to the sources.
pub use decompress_dispatch::decompress_multiple_filenames;

pub use decompress_dispatch::DecompressStats;
