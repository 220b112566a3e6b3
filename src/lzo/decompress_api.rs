//! Public LZO1X block decompression API.
//!
//! Same surface as [`crate::lz4`]: a generic region form, a byte-array form
//! with explicit offsets, an allocating form, and the encoder's worst-case
//! bound.

use crate::block::{drive, drive_at, drive_to_vec, DecompressError};
use crate::buffer::{ReadRegion, WriteRegion};

use super::decompress_core::decompress_block;

/// Decompresses one LZO1X block.
///
/// Returns the number of bytes written to the start of `output`.  On error the
/// contents of `output` are unspecified.
///
/// ```
/// let mut out = [0u8; 3];
/// let block = [20, b'a', b'b', b'c', 0x11, 0x00, 0x00];
/// let n = lzdecode::lzo::decompress(&block, &mut out).unwrap();
/// assert_eq!(&out[..n], b"abc");
/// ```
pub fn decompress<I, O>(input: &I, output: &mut O) -> Result<usize, DecompressError>
where
    I: ReadRegion + ?Sized,
    O: WriteRegion + ?Sized,
{
    drive(decompress_block, input, output)
}

/// Decompresses `input[input_offset..input_offset + input_length]` into
/// `output[output_offset..output_offset + max_output_length]`.
pub fn decompress_at(
    input: &[u8],
    input_offset: usize,
    input_length: usize,
    output: &mut [u8],
    output_offset: usize,
    max_output_length: usize,
) -> Result<usize, DecompressError> {
    drive_at(
        decompress_block,
        input,
        input_offset,
        input_length,
        output,
        output_offset,
        max_output_length,
    )
}

/// Decompresses into a new vector holding at most `max_output_length` bytes.
pub fn decompress_to_vec<I>(input: &I, max_output_length: usize) -> Result<Vec<u8>, DecompressError>
where
    I: ReadRegion + ?Sized,
{
    drive_to_vec(decompress_block, input, max_output_length)
}

/// Upper bound on the LZO1X encoding of `input_len` bytes.
pub const fn max_compressed_length(input_len: usize) -> usize {
    input_len
        .saturating_add(input_len / 16)
        .saturating_add(64 + 3)
}
