//! LZ4 block decompression core.
//!
//!   - `read_length_extension`: 255-additive length continuation decoder
//!   - `decompress_block`: the sequence loop
//!
//! # Block layout
//!
//! ```text
//! sequence := token [lit_ext*] literals* [offset:le16 [match_ext*]]
//! token    := literal_length:4 | match_length_minus_4:4
//! ```
//!
//! The block ends when the input is exhausted right after a literal run; that
//! last sequence carries no offset and no match.
//!
//! # Security boundary
//!
//! All input is untrusted.  Every length, offset and copy is validated through
//! the block cursors before any byte moves; malformed or truncated input
//! returns `Err(DecompressError::MalformedInput)` and never panics.

use crate::block::cursor::{InputCursor, OutputCursor};
use crate::block::types::{malformed, DecompressError, Malformed, LENGTH_CONTINUE};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Implicit minimum match length.
pub const MINMATCH: usize = 4;

pub const ML_BITS: u32 = 4;
pub const ML_MASK: usize = (1 << ML_BITS) - 1;
pub const RUN_BITS: u32 = 8 - ML_BITS;
pub const RUN_MASK: usize = (1 << RUN_BITS) - 1;

// ─────────────────────────────────────────────────────────────────────────────
// read_length_extension
// ─────────────────────────────────────────────────────────────────────────────

/// Reads the extension bytes that follow a saturated nibble.
///
/// Each `255` byte adds 255 and continues; the first byte below 255 adds its
/// value and ends the sequence.  Input running out before that terminating
/// byte is [`Malformed::TruncatedLength`].
#[inline(always)]
fn read_length_extension(input: &mut InputCursor<'_>) -> Result<usize, DecompressError> {
    let start = input.position();
    let mut length: usize = 0;
    loop {
        let s = input.next_byte(Malformed::TruncatedLength)?;
        length = length
            .checked_add(s as usize)
            .ok_or_else(|| malformed(Malformed::LengthOverflow, start))?;
        if s != LENGTH_CONTINUE {
            return Ok(length);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_block
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes one LZ4 block from `input` into `output`.
///
/// Returns the number of bytes written.  Succeeds only when the input is
/// consumed exactly, ending on a literal-only sequence.
pub(crate) fn decompress_block(
    input: &mut InputCursor<'_>,
    output: &mut OutputCursor<'_>,
) -> Result<usize, DecompressError> {
    if input.is_exhausted() {
        return Err(malformed(Malformed::EmptyInput, 0));
    }

    loop {
        // After a match the input must still hold another token.
        let token = input.next_byte(Malformed::UnexpectedEnd)? as usize;

        // ── Literals ──────────────────────────────────────────────────────────
        let mut literal_length = token >> ML_BITS;
        if literal_length == RUN_MASK {
            literal_length += read_length_extension(input)?;
        }
        output.copy_literal(input, literal_length)?;

        if input.is_exhausted() {
            log::trace!("lz4 block decoded to {} bytes", output.position());
            return Ok(output.position());
        }

        // ── Match ─────────────────────────────────────────────────────────────
        let at = input.position();
        let offset = input.read_le16(Malformed::UnexpectedEnd)? as usize;
        if offset == 0 {
            return Err(malformed(Malformed::ZeroOffset, at));
        }

        let mut match_length = token & ML_MASK;
        if match_length == ML_MASK {
            match_length += read_length_extension(input)?;
        }
        let match_length = match_length
            .checked_add(MINMATCH)
            .ok_or_else(|| malformed(Malformed::LengthOverflow, at))?;

        output.copy_match(offset, match_length, at)?;
    }
}
