//! Public LZ4 block decompression API.
//!
//!   - [`decompress`]: generic over any [`ReadRegion`] / [`WriteRegion`],
//!     covering owned arrays, externally-addressed memory and buffers with
//!     headroom through one code path
//!   - [`decompress_at`]: byte-array form with explicit offsets and lengths
//!   - [`decompress_to_vec`]: convenience form allocating its own output
//!   - [`max_compressed_length`]: worst-case encoded size

use crate::block::{drive, drive_at, drive_to_vec, DecompressError};
use crate::buffer::{ReadRegion, WriteRegion};

use super::decompress_core::decompress_block;

/// Decompresses one LZ4 block.
///
/// Returns the number of bytes written to the start of `output`.  On error the
/// contents of `output` are unspecified.
///
/// ```
/// let mut out = [0u8; 5];
/// let n = lzdecode::lz4::decompress(&[0x40, b'T', b'E', b'S', b'T'], &mut out).unwrap();
/// assert_eq!(&out[..n], b"TEST");
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
///
/// Returns the number of bytes written starting at `output_offset`.  An
/// offset/length pair that does not fit its array is
/// [`DecompressError::InvalidRange`].
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

/// Upper bound on the LZ4 encoding of `input_len` bytes.
pub const fn max_compressed_length(input_len: usize) -> usize {
    input_len
        .saturating_add(input_len / 255)
        .saturating_add(16)
}
