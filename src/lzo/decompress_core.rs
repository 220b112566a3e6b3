//! LZO1X block decompression core.
//!
//! An LZO1X block is a stream of command bytes.  The numeric range of the
//! command byte selects its family, and for the smallest commands the meaning
//! also depends on how many literals the previous command copied (the
//! decoder's `state`):
//!
//! | Command    | Family | Length                         | Distance                                  |
//! |------------|--------|--------------------------------|-------------------------------------------|
//! | `64..=255` | M2     | `(c >> 5) + 1`                 | `(next << 3) + ((c >> 2) & 7) + 1`        |
//! | `32..=63`  | M3     | `(c & 31) + 2`, or extended 33 | `(le16 >> 2) + 1`                         |
//! | `16..=31`  | M4     | `(c & 7) + 2`, or extended 9   | `16384 + ((c & 8) << 11) + (le16 >> 2)`   |
//! | `0..=15`   | state 0: literal run of `c + 3`, or extended 18                            ||
//! | `0..=15`   | state 1-3: M1, length 2, distance `(c >> 2) + (next << 2) + 1`             ||
//! | `0..=15`   | state 4: M1, length 3, distance `(c >> 2) + (next << 2) + 2049`            ||
//!
//! Every match is followed by `0..=3` literals taken from the low two bits of
//! its last operand; that count becomes the next state.  An M4 with a zero
//! distance part is the end-of-block marker, always encoded `11 00 00`.
//!
//! The first byte of a block is special: values `>= 18` open the block with a
//! literal run of `c - 17` bytes.
//!
//! # Security boundary
//!
//! All input is untrusted.  Command decoding only reads through the input
//! cursor, and every copy goes through the bounds-checked primitives in
//! [`crate::block::cursor`].

use crate::block::cursor::{InputCursor, OutputCursor};
use crate::block::types::{malformed, DecompressError, Malformed};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest command byte of the M2 family.
pub const M2_MARKER: u8 = 64;
/// Smallest command byte of the M3 family.
pub const M3_MARKER: u8 = 32;
/// Smallest command byte of the M4 family.
pub const M4_MARKER: u8 = 16;

/// First-byte values at or above this open the block with a literal run.
pub const FIRST_LITERAL_MIN: u8 = 18;
/// Bias subtracted from a first-byte literal run.
const FIRST_LITERAL_BIAS: usize = 17;

/// Extra distance carried by every M4 match.
pub const M4_BASE_DISTANCE: usize = 16384;
/// Extra distance carried by an M1 match that follows a literal run of 4+.
pub const M1_LONG_BASE_DISTANCE: usize = 2049;

/// Base lengths once a zero length field switches to the extended form.
const LITERAL_EXTENDED_BASE: usize = 18;
const M3_EXTENDED_BASE: usize = 33;
const M4_EXTENDED_BASE: usize = 9;

/// The canonical end-of-block command.
pub const END_MARKER: [u8; 3] = [0x11, 0x00, 0x00];

/// State after a literal run of four or more bytes.
const STATE_LONG_LITERAL: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// One decoded command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Copy a run of literals; the next state is 4.
    Literal { length: usize },
    /// Copy a back-reference, then `trailing` literals.
    Match {
        length: usize,
        distance: usize,
        trailing: usize,
    },
    End,
}

/// Reads the zero-run length extension: every `0x00` adds 255, and the first
/// non-zero byte adds its value and terminates.
#[inline(always)]
fn read_zero_extension(input: &mut InputCursor<'_>, base: usize) -> Result<usize, DecompressError> {
    let start = input.position();
    let mut zeros: usize = 0;
    while input.peek() == Some(0) {
        input.next_byte(Malformed::TruncatedLength)?;
        zeros += 1;
    }
    let tail = input.next_byte(Malformed::TruncatedLength)? as usize;
    zeros
        .checked_mul(255)
        .and_then(|n| n.checked_add(base))
        .and_then(|n| n.checked_add(tail))
        .ok_or_else(|| malformed(Malformed::LengthOverflow, start))
}

/// Decodes the command starting with byte `c` (already consumed, found at
/// input offset `at`).
#[inline(always)]
fn decode_command(
    input: &mut InputCursor<'_>,
    c: u8,
    at: usize,
    state: usize,
) -> Result<Command, DecompressError> {
    let ci = c as usize;

    if c >= M2_MARKER {
        let next = input.next_byte(Malformed::UnexpectedEnd)? as usize;
        return Ok(Command::Match {
            length: (ci >> 5) + 1,
            distance: (next << 3) + ((ci >> 2) & 7) + 1,
            trailing: ci & 3,
        });
    }

    if c >= M3_MARKER {
        let length = match ci & 31 {
            0 => read_zero_extension(input, M3_EXTENDED_BASE)?,
            l => l + 2,
        };
        let word = input.read_le16(Malformed::UnexpectedEnd)? as usize;
        return Ok(Command::Match {
            length,
            distance: (word >> 2) + 1,
            trailing: word & 3,
        });
    }

    if c >= M4_MARKER {
        let length = match ci & 7 {
            0 => read_zero_extension(input, M4_EXTENDED_BASE)?,
            l => l + 2,
        };
        let word = input.read_le16(Malformed::UnexpectedEnd)? as usize;
        let far = ((ci & 8) << 11) + (word >> 2);
        if far == 0 {
            if c != END_MARKER[0] || word != 0 {
                return Err(malformed(Malformed::InvalidEndMarker, at));
            }
            return Ok(Command::End);
        }
        return Ok(Command::Match {
            length,
            distance: far + M4_BASE_DISTANCE,
            trailing: word & 3,
        });
    }

    match state {
        0 => {
            let length = match ci {
                0 => read_zero_extension(input, LITERAL_EXTENDED_BASE)?,
                l => l + 3,
            };
            Ok(Command::Literal { length })
        }
        1..=3 => {
            let next = input.next_byte(Malformed::UnexpectedEnd)? as usize;
            Ok(Command::Match {
                length: 2,
                distance: (ci >> 2) + (next << 2) + 1,
                trailing: ci & 3,
            })
        }
        _ => {
            let next = input.next_byte(Malformed::UnexpectedEnd)? as usize;
            Ok(Command::Match {
                length: 3,
                distance: (ci >> 2) + (next << 2) + M1_LONG_BASE_DISTANCE,
                trailing: ci & 3,
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_block
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes one LZO1X block from `input` into `output`.
///
/// Returns the number of bytes written.  Succeeds only when the end-of-block
/// marker is the last thing in the input.
pub(crate) fn decompress_block(
    input: &mut InputCursor<'_>,
    output: &mut OutputCursor<'_>,
) -> Result<usize, DecompressError> {
    let first = match input.peek() {
        Some(b) => b,
        None => return Err(malformed(Malformed::EmptyInput, 0)),
    };

    let mut state = 0;
    if first >= FIRST_LITERAL_MIN {
        input.next_byte(Malformed::UnexpectedEnd)?;
        let length = first as usize - FIRST_LITERAL_BIAS;
        output.copy_literal(input, length)?;
        state = length.min(STATE_LONG_LITERAL);
    }

    loop {
        let at = input.position();
        let c = input.next_byte(Malformed::MissingEndMarker)?;
        match decode_command(input, c, at, state)? {
            Command::Literal { length } => {
                output.copy_literal(input, length)?;
                state = STATE_LONG_LITERAL;
            }
            Command::Match {
                length,
                distance,
                trailing,
            } => {
                output.copy_match(distance, length, at)?;
                output.copy_literal(input, trailing)?;
                state = trailing;
            }
            Command::End => break,
        }
    }

    if !input.is_exhausted() {
        return Err(malformed(Malformed::TrailingInput, input.position()));
    }
    log::trace!("lzo block decoded to {} bytes", output.position());
    Ok(output.position())
}
