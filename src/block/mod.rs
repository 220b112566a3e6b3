//! Pieces shared by the LZ4 and LZO block decoders: the error type, the
//! bounds-checked cursors with their literal and match copy primitives, and
//! the drivers that bind a decode loop to caller-supplied regions.

pub(crate) mod cursor;
pub mod types;

pub use types::{DecompressError, Malformed};

use crate::buffer::{checked_range, input_view, output_view, ReadRegion, SlackBuffer, WriteRegion};
use cursor::{InputCursor, OutputCursor};

/// A per-format decode loop.
pub(crate) type BlockDecoder =
    fn(&mut InputCursor<'_>, &mut OutputCursor<'_>) -> Result<usize, DecompressError>;

/// Runs `decoder` over the logical ranges of `input` and `output`.
pub(crate) fn drive<I, O>(
    decoder: BlockDecoder,
    input: &I,
    output: &mut O,
) -> Result<usize, DecompressError>
where
    I: ReadRegion + ?Sized,
    O: WriteRegion + ?Sized,
{
    let (src, src_limit) = input_view(input)?;
    let (dst, dst_limit) = output_view(output)?;
    let mut input = InputCursor::new(src, src_limit);
    let mut output = OutputCursor::new(dst, dst_limit);
    decoder(&mut input, &mut output)
}

/// Runs `decoder` over `input[input_offset..][..input_length]` into
/// `output[output_offset..][..max_output_length]`.
///
/// Bytes of `input` past the logical range serve as read headroom.  Nothing
/// outside the output range is written.
pub(crate) fn drive_at(
    decoder: BlockDecoder,
    input: &[u8],
    input_offset: usize,
    input_length: usize,
    output: &mut [u8],
    output_offset: usize,
    max_output_length: usize,
) -> Result<usize, DecompressError> {
    checked_range(input_offset, input_length, input.len())?;
    let output_end = checked_range(output_offset, max_output_length, output.len())?;
    let input = SlackBuffer::new(&input[input_offset..], input_length)?;
    drive(decoder, &input, &mut output[output_offset..output_end])
}

/// Decodes into a fresh vector of at most `max_output_length` bytes.
pub(crate) fn drive_to_vec<I>(
    decoder: BlockDecoder,
    input: &I,
    max_output_length: usize,
) -> Result<Vec<u8>, DecompressError>
where
    I: ReadRegion + ?Sized,
{
    let physical = max_output_length.saturating_add(types::WILDCOPYLENGTH);
    let mut output = SlackBuffer::new(vec![0u8; physical], max_output_length)?;
    let n = drive(decoder, input, &mut output)?;
    let mut out = output.into_inner();
    out.truncate(n);
    Ok(out)
}
