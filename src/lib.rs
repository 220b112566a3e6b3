// lzdecode: pure-Rust LZ4 and LZO1X raw block decoders
//
//! Pure-Rust decoders for the LZ4 and LZO1X raw block formats.
//!
//! Each decoder takes one self-contained compressed block and reconstructs
//! the original bytes in a single forward pass, never reading or writing
//! outside the caller's regions and rejecting every malformed encoding with
//! [`DecompressError::MalformedInput`].
//!
//! | Module      | Contents |
//! |-------------|----------|
//! | [`lz4`]     | LZ4 block decoder |
//! | [`lzo`]     | LZO1X block decoder |
//! | [`buffer`]  | [`ReadRegion`] / [`WriteRegion`] and the region types |
//! | [`block`]   | Shared error type and copy primitives |
//! | [`io`]      | Hadoop block-stream reader and file-level decoding |
//! | [`config`]  | Constants and environment overrides |
//! | [`cli`]     | Support code for the `lzdecode` binary |

pub mod block;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod io;
pub mod lz4;
pub mod lzo;

use std::fmt;
use std::path::Path;

pub use block::{DecompressError, Malformed};
pub use buffer::{ExternalBuffer, ExternalBufferMut, ReadRegion, SlackBuffer, WriteRegion};

// ── Version constants ─────────────────────────────────────────────────────────
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version string.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

// ── Codec selection ───────────────────────────────────────────────────────────

/// Block format selector, for callers that pick the format at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Codec {
    Lz4,
    Lzo,
}

impl Codec {
    pub const ALL: [Codec; 2] = [Codec::Lz4, Codec::Lzo];

    pub fn name(self) -> &'static str {
        match self {
            Codec::Lz4 => "lz4",
            Codec::Lzo => "lzo",
        }
    }

    /// File extensions conventionally used for block streams of this codec.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Codec::Lz4 => &[".lz4"],
            Codec::Lzo => &[".lzo", ".lzo_deflate"],
        }
    }

    /// Guesses the codec from a file name's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Codec> {
        let name = path.as_ref().file_name()?.to_str()?;
        Codec::ALL
            .into_iter()
            .find(|c| c.extensions().iter().any(|ext| name.len() > ext.len() && name.ends_with(ext)))
    }

    /// Removes this codec's extension from `name`, if present.
    pub fn strip_extension(self, name: &str) -> Option<&str> {
        self.extensions()
            .iter()
            .find_map(|ext| name.strip_suffix(ext).filter(|stem| !stem.is_empty()))
    }

    /// Decompresses one block; see [`lz4::decompress`] and [`lzo::decompress`].
    pub fn decompress<I, O>(self, input: &I, output: &mut O) -> Result<usize, DecompressError>
    where
        I: ReadRegion + ?Sized,
        O: WriteRegion + ?Sized,
    {
        match self {
            Codec::Lz4 => lz4::decompress(input, output),
            Codec::Lzo => lzo::decompress(input, output),
        }
    }

    /// Byte-array form with explicit offsets; see [`lz4::decompress_at`].
    pub fn decompress_at(
        self,
        input: &[u8],
        input_offset: usize,
        input_length: usize,
        output: &mut [u8],
        output_offset: usize,
        max_output_length: usize,
    ) -> Result<usize, DecompressError> {
        match self {
            Codec::Lz4 => lz4::decompress_at(
                input,
                input_offset,
                input_length,
                output,
                output_offset,
                max_output_length,
            ),
            Codec::Lzo => lzo::decompress_at(
                input,
                input_offset,
                input_length,
                output,
                output_offset,
                max_output_length,
            ),
        }
    }

    pub fn decompress_to_vec<I>(self, input: &I, max_output_length: usize) -> Result<Vec<u8>, DecompressError>
    where
        I: ReadRegion + ?Sized,
    {
        match self {
            Codec::Lz4 => lz4::decompress_to_vec(input, max_output_length),
            Codec::Lzo => lzo::decompress_to_vec(input, max_output_length),
        }
    }

    /// Worst-case compressed size of `input_len` bytes.
    pub fn max_compressed_length(self, input_len: usize) -> usize {
        match self {
            Codec::Lz4 => lz4::max_compressed_length(input_len),
            Codec::Lzo => lzo::max_compressed_length(input_len),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
