//! Error type, malformed-input reasons, and constants shared by both block
//! decoders.
//!
//! Every decode failure caused by the compressed bytes themselves is reported
//! as [`DecompressError::MalformedInput`].  The attached [`Malformed`] reason
//! and input offset are diagnostics only: callers must treat all malformed
//! results alike and discard whatever was written to the output region.

use core::fmt;
use std::io;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Granularity of the over-wide copies in [`super::cursor`].  A wild copy may
/// touch up to `WILDCOPYLENGTH - 1` bytes past the logical end of a copy, so it
/// is only taken when at least this much physical slack exists.
pub const WILDCOPYLENGTH: usize = 8;

/// Longest literal run that is copied with the wild-copy loop.  Longer runs go
/// through `copy_from_slice`, which is already vectorised.
pub const WILD_LITERAL_MAX: usize = 32;

/// Extension bytes of this value continue a length; anything smaller ends it.
pub const LENGTH_CONTINUE: u8 = 255;

// ─────────────────────────────────────────────────────────────────────────────
// Malformed reasons
// ─────────────────────────────────────────────────────────────────────────────

/// Why a block was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Malformed {
    /// The input range is empty; no valid block of either format is empty.
    EmptyInput,
    /// Input ended in the middle of a token, offset or command operand.
    UnexpectedEnd,
    /// Input ended inside a length-extension sequence.
    TruncatedLength,
    /// A length-extension sequence overflowed `usize`.
    LengthOverflow,
    /// A literal run reads past the input limit.
    LiteralOverrun,
    /// A literal or match copy writes past the output limit.
    OutputOverrun,
    /// A match distance of zero.
    ZeroOffset,
    /// A match refers to bytes before the start of the block's output.
    OffsetBeforeStart,
    /// LZO: input exhausted without an end-of-block marker.
    MissingEndMarker,
    /// LZO: an end-of-block command that is not the canonical `11 00 00`.
    InvalidEndMarker,
    /// LZO: bytes remain after the end-of-block marker.
    TrailingInput,
}

impl Malformed {
    pub fn as_str(self) -> &'static str {
        match self {
            Malformed::EmptyInput => "empty input",
            Malformed::UnexpectedEnd => "input ended inside a sequence",
            Malformed::TruncatedLength => "input ended inside a length extension",
            Malformed::LengthOverflow => "length extension overflows",
            Malformed::LiteralOverrun => "literal run exceeds input",
            Malformed::OutputOverrun => "output limit exceeded",
            Malformed::ZeroOffset => "match offset is zero",
            Malformed::OffsetBeforeStart => "match offset points before block start",
            Malformed::MissingEndMarker => "missing end-of-block marker",
            Malformed::InvalidEndMarker => "invalid end-of-block marker",
            Malformed::TrailingInput => "trailing input after end-of-block marker",
        }
    }
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by block decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// The compressed data is malformed or truncated, or decoding it would
    /// leave the caller's output region.  `offset` is the input position
    /// (relative to the start of the input range) where it was detected.
    MalformedInput { reason: Malformed, offset: usize },
    /// A caller-supplied `(offset, length)` pair does not fit the array it
    /// indexes.  Raised before any compressed byte is examined.
    InvalidRange {
        offset: usize,
        length: usize,
        capacity: usize,
    },
}

impl DecompressError {
    /// The malformed reason, or `None` for a range error.
    pub fn reason(&self) -> Option<Malformed> {
        match self {
            DecompressError::MalformedInput { reason, .. } => Some(*reason),
            DecompressError::InvalidRange { .. } => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, DecompressError::MalformedInput { .. })
    }
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompressError::MalformedInput { reason, offset } => {
                write!(f, "malformed input at offset {}: {}", offset, reason)
            }
            DecompressError::InvalidRange {
                offset,
                length,
                capacity,
            } => write!(
                f,
                "range {}+{} exceeds buffer of {} bytes",
                offset, length, capacity
            ),
        }
    }
}

impl std::error::Error for DecompressError {}

impl From<DecompressError> for io::Error {
    fn from(e: DecompressError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}

/// Build a malformed-input error and record it at debug level.
#[cold]
#[inline(never)]
pub(crate) fn malformed(reason: Malformed, offset: usize) -> DecompressError {
    log::debug!("rejecting block at input offset {}: {}", offset, reason);
    DecompressError::MalformedInput { reason, offset }
}
