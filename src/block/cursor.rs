//! Bounds-checked cursors and the two copy primitives shared by the LZ4 and
//! LZO decoders.
//!
//! # Security boundary
//!
//! Both cursors carry a *logical* limit and a *physical* slice.  Every copy is
//! validated against the logical limit before a single byte moves.  The wide
//! copy paths may additionally touch bytes between the logical end of a copy
//! and the end of the physical slice; they are only taken when that physical
//! slack is present, so no access ever leaves the slices handed in by the
//! caller.
//!
//! All `unsafe` blocks carry an explicit `// SAFETY:` comment.

use core::ptr;

use super::types::{malformed, DecompressError, Malformed, WILDCOPYLENGTH, WILD_LITERAL_MAX};

// ─────────────────────────────────────────────────────────────────────────────
// Wild copy
// ─────────────────────────────────────────────────────────────────────────────

/// Copies 8 bytes at a time until `len` bytes are covered; may write up to
/// `WILDCOPYLENGTH - 1` bytes past `dst + len`.
///
/// # Safety
/// `src` must be readable and `dst` writable for `len` rounded up to a multiple
/// of 8 bytes.  If both point into the same allocation, `dst - src` must be at
/// least 8 so that no single 8-byte step overlaps itself.
#[inline(always)]
unsafe fn wild_copy8(mut dst: *mut u8, mut src: *const u8, len: usize) {
    let dst_end = dst.add(len);
    loop {
        ptr::copy_nonoverlapping(src, dst, WILDCOPYLENGTH);
        dst = dst.add(WILDCOPYLENGTH);
        src = src.add(WILDCOPYLENGTH);
        if dst >= dst_end {
            break;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input cursor
// ─────────────────────────────────────────────────────────────────────────────

/// Forward-only read position over `src[..limit]`.
///
/// Bytes in `src[limit..]` are never interpreted, but may be read as part of a
/// wild literal copy whose logical part ends at or before `limit`.
pub(crate) struct InputCursor<'a> {
    src: &'a [u8],
    limit: usize,
    pos: usize,
}

impl<'a> InputCursor<'a> {
    pub(crate) fn new(src: &'a [u8], limit: usize) -> Self {
        debug_assert!(limit <= src.len());
        InputCursor { src, limit, pos: 0 }
    }

    #[inline(always)]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.pos >= self.limit
    }

    /// Reads one byte, failing with `reason` if the input is exhausted.
    #[inline(always)]
    pub(crate) fn next_byte(&mut self, reason: Malformed) -> Result<u8, DecompressError> {
        if self.pos >= self.limit {
            return Err(malformed(reason, self.pos));
        }
        let b = self.src[self.pos];
        self.pos += 1;
        Ok(b)
    }

    /// Peeks at the next byte without consuming it.
    #[inline(always)]
    pub(crate) fn peek(&self) -> Option<u8> {
        if self.pos < self.limit {
            Some(self.src[self.pos])
        } else {
            None
        }
    }

    /// Reads a little-endian `u16`, failing with `reason` if fewer than two
    /// bytes remain.
    #[inline(always)]
    pub(crate) fn read_le16(&mut self, reason: Malformed) -> Result<u16, DecompressError> {
        if self.limit - self.pos < 2 {
            return Err(malformed(reason, self.pos));
        }
        let v = u16::from_le_bytes([self.src[self.pos], self.src[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output cursor
// ─────────────────────────────────────────────────────────────────────────────

/// Forward-only write position over `dst[..limit]`.
///
/// `dst[limit..]` is physical headroom: it may receive the tail of a wild
/// copy but never holds decoded output.
pub(crate) struct OutputCursor<'a> {
    dst: &'a mut [u8],
    limit: usize,
    pos: usize,
}

impl<'a> OutputCursor<'a> {
    pub(crate) fn new(dst: &'a mut [u8], limit: usize) -> Self {
        debug_assert!(limit <= dst.len());
        OutputCursor { dst, limit, pos: 0 }
    }

    /// Number of bytes produced so far.
    #[inline(always)]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Copies `len` literal bytes from `input` to the output.
    ///
    /// Fails with [`Malformed::LiteralOverrun`] if the run extends past the
    /// input limit, or [`Malformed::OutputOverrun`] if it extends past the
    /// output limit.  Nothing is written on failure.
    #[inline(always)]
    pub(crate) fn copy_literal(
        &mut self,
        input: &mut InputCursor<'_>,
        len: usize,
    ) -> Result<(), DecompressError> {
        if len == 0 {
            return Ok(());
        }
        let src_start = input.pos;
        let src_end = match src_start.checked_add(len) {
            Some(end) if end <= input.limit => end,
            _ => return Err(malformed(Malformed::LiteralOverrun, src_start)),
        };
        let dst_end = match self.pos.checked_add(len) {
            Some(end) if end <= self.limit => end,
            _ => return Err(malformed(Malformed::OutputOverrun, src_start)),
        };

        if len <= WILD_LITERAL_MAX
            && src_end + WILDCOPYLENGTH <= input.src.len()
            && dst_end + WILDCOPYLENGTH <= self.dst.len()
        {
            // SAFETY: both ranges were checked above to have at least
            // `len + WILDCOPYLENGTH` physical bytes available, which covers
            // `len` rounded up to a multiple of 8.  `src` and `dst` are
            // distinct slices, so they cannot overlap.
            unsafe {
                wild_copy8(
                    self.dst.as_mut_ptr().add(self.pos),
                    input.src.as_ptr().add(src_start),
                    len,
                );
            }
        } else {
            self.dst[self.pos..dst_end].copy_from_slice(&input.src[src_start..src_end]);
        }

        input.pos = src_end;
        self.pos = dst_end;
        Ok(())
    }

    /// Copies `len` bytes starting `distance` bytes behind the write position.
    ///
    /// Source and destination overlap whenever `distance < len`; the result is
    /// then the repeating pattern of the last `distance` bytes, exactly as a
    /// byte-at-a-time forward copy would produce.  `at` is the input offset
    /// reported in errors.
    #[inline(always)]
    pub(crate) fn copy_match(
        &mut self,
        distance: usize,
        len: usize,
        at: usize,
    ) -> Result<(), DecompressError> {
        if distance == 0 {
            return Err(malformed(Malformed::ZeroOffset, at));
        }
        if distance > self.pos {
            return Err(malformed(Malformed::OffsetBeforeStart, at));
        }
        let end = match self.pos.checked_add(len) {
            Some(end) if end <= self.limit => end,
            _ => return Err(malformed(Malformed::OutputOverrun, at)),
        };
        let src = self.pos - distance;

        if distance >= WILDCOPYLENGTH && end + WILDCOPYLENGTH <= self.dst.len() {
            let base = self.dst.as_mut_ptr();
            // SAFETY: `src < pos` and `end + WILDCOPYLENGTH <= dst.len()`, so
            // every 8-byte step stays inside `dst`.  `distance >= 8` keeps
            // each step's source and destination disjoint; later steps read
            // bytes written by earlier ones, which is the intended LZ77
            // semantics.
            unsafe {
                wild_copy8(base.add(self.pos), base.add(src) as *const u8, len);
            }
        } else if distance >= len {
            self.dst.copy_within(src..src + len, self.pos);
        } else if distance == 1 {
            let b = self.dst[src];
            self.dst[self.pos..end].fill(b);
        } else {
            // Grow the copied run by doubling.  Each chunk ends at or before
            // the current write position and `copied` stays a multiple of
            // `distance`, so copying from `src` reproduces the pattern.
            let mut copied = 0;
            while copied < len {
                let chunk = (len - copied).min(distance + copied);
                self.dst.copy_within(src..src + chunk, self.pos + copied);
                copied += chunk;
            }
        }

        self.pos = end;
        Ok(())
    }
}
