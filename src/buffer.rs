//! Byte regions the decoders read from and write to.
//!
//! A region is a physical byte slice plus a *logical* length.  The decoders
//! interpret and produce bytes only inside the logical range; the physical
//! bytes past it (headroom) may be touched by the wide-copy fast paths.
//!
//! | Type                 | Backing                                  | Headroom |
//! |----------------------|------------------------------------------|----------|
//! | `[u8]`, `Vec<u8>`    | owned or borrowed array                  | none     |
//! | [`ExternalBuffer`]   | externally-addressed memory (read)       | none     |
//! | [`ExternalBufferMut`]| externally-addressed memory (write)      | none     |
//! | [`SlackBuffer`]      | any of the above, logically shortened    | `physical - logical` |
//!
//! Both decoders are generic over [`ReadRegion`] / [`WriteRegion`], so every
//! backing goes through the same decode loop and produces identical results.

use core::marker::PhantomData;
use core::slice;

use crate::block::DecompressError;

// ─────────────────────────────────────────────────────────────────────────────
// Traits
// ─────────────────────────────────────────────────────────────────────────────

/// A contiguous byte region a decoder reads compressed input from.
pub trait ReadRegion {
    /// Every byte that may physically be read.
    fn readable(&self) -> &[u8];

    /// Length of the compressed data at the start of [`readable`](Self::readable).
    fn logical_len(&self) -> usize {
        self.readable().len()
    }
}

/// A contiguous byte region a decoder writes output into.
pub trait WriteRegion {
    /// Every byte that may physically be written.
    fn writable(&mut self) -> &mut [u8];

    /// Maximum number of decoded bytes, counted from the start of
    /// [`writable`](Self::writable).
    fn logical_len(&self) -> usize;
}

impl ReadRegion for [u8] {
    fn readable(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> ReadRegion for [u8; N] {
    fn readable(&self) -> &[u8] {
        self
    }
}

impl ReadRegion for Vec<u8> {
    fn readable(&self) -> &[u8] {
        self
    }
}

impl WriteRegion for [u8] {
    fn writable(&mut self) -> &mut [u8] {
        self
    }

    fn logical_len(&self) -> usize {
        self.len()
    }
}

impl<const N: usize> WriteRegion for [u8; N] {
    fn writable(&mut self) -> &mut [u8] {
        self
    }

    fn logical_len(&self) -> usize {
        N
    }
}

impl WriteRegion for Vec<u8> {
    fn writable(&mut self) -> &mut [u8] {
        self
    }

    fn logical_len(&self) -> usize {
        self.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Externally-addressed memory
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only view of memory the crate does not own, such as an mmapped file or
/// a buffer handed over FFI.
#[derive(Debug, Clone, Copy)]
pub struct ExternalBuffer<'a> {
    ptr: *const u8,
    len: usize,
    _marker: PhantomData<&'a [u8]>,
}

impl<'a> ExternalBuffer<'a> {
    /// # Safety
    /// `ptr` must be valid for reads of `len` bytes for the whole lifetime
    /// `'a`, and the memory must not be mutated while this view exists.
    /// A null `ptr` is only allowed together with `len == 0`.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Self {
        ExternalBuffer {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl ReadRegion for ExternalBuffer<'_> {
    fn readable(&self) -> &[u8] {
        if self.len == 0 {
            return &[];
        }
        // SAFETY: guaranteed by the contract of `from_raw_parts`.
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

/// Writable view of memory the crate does not own.
#[derive(Debug)]
pub struct ExternalBufferMut<'a> {
    ptr: *mut u8,
    len: usize,
    _marker: PhantomData<&'a mut [u8]>,
}

impl<'a> ExternalBufferMut<'a> {
    /// # Safety
    /// `ptr` must be valid for reads and writes of `len` bytes for the whole
    /// lifetime `'a`, and no other reference may access that memory while this
    /// view exists.  A null `ptr` is only allowed together with `len == 0`.
    pub unsafe fn from_raw_parts(ptr: *mut u8, len: usize) -> Self {
        ExternalBufferMut {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl WriteRegion for ExternalBufferMut<'_> {
    fn writable(&mut self) -> &mut [u8] {
        if self.len == 0 {
            return &mut [];
        }
        // SAFETY: guaranteed by the contract of `from_raw_parts`; `&mut self`
        // keeps the returned slice unique.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }

    fn logical_len(&self) -> usize {
        self.len
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Headroom
// ─────────────────────────────────────────────────────────────────────────────

/// A region whose logical length is shorter than its backing storage.
///
/// The difference is headroom the decoders may use for wide copies.  The
/// logical length is checked against the backing once, here, so the decode
/// loop never has to re-validate it.
#[derive(Debug)]
pub struct SlackBuffer<B> {
    buf: B,
    logical_len: usize,
}

impl<B: AsRef<[u8]>> SlackBuffer<B> {
    /// Wraps `buf`, exposing only its first `logical_len` bytes as data.
    pub fn new(buf: B, logical_len: usize) -> Result<Self, DecompressError> {
        let capacity = buf.as_ref().len();
        if logical_len > capacity {
            return Err(DecompressError::InvalidRange {
                offset: 0,
                length: logical_len,
                capacity,
            });
        }
        Ok(SlackBuffer { buf, logical_len })
    }

    /// Physical bytes available past the logical end.
    pub fn headroom(&self) -> usize {
        self.buf.as_ref().len() - self.logical_len
    }

    pub fn into_inner(self) -> B {
        self.buf
    }
}

impl<B: AsRef<[u8]>> ReadRegion for SlackBuffer<B> {
    fn readable(&self) -> &[u8] {
        self.buf.as_ref()
    }

    fn logical_len(&self) -> usize {
        self.logical_len
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> WriteRegion for SlackBuffer<B> {
    fn writable(&mut self) -> &mut [u8] {
        self.buf.as_mut()
    }

    fn logical_len(&self) -> usize {
        self.logical_len
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Range checks
// ─────────────────────────────────────────────────────────────────────────────

/// Validates that `[offset, offset + length)` lies inside a buffer of
/// `capacity` bytes and returns the end of the range.
pub fn checked_range(offset: usize, length: usize, capacity: usize) -> Result<usize, DecompressError> {
    match offset.checked_add(length) {
        Some(end) if end <= capacity => Ok(end),
        _ => Err(DecompressError::InvalidRange {
            offset,
            length,
            capacity,
        }),
    }
}

/// Logical input view: `(physical bytes, logical limit)`.
pub(crate) fn input_view<I: ReadRegion + ?Sized>(input: &I) -> Result<(&[u8], usize), DecompressError> {
    let bytes = input.readable();
    let limit = input.logical_len();
    checked_range(0, limit, bytes.len())?;
    Ok((bytes, limit))
}

/// Logical output view: `(physical bytes, logical limit)`.
pub(crate) fn output_view<O: WriteRegion + ?Sized>(
    output: &mut O,
) -> Result<(&mut [u8], usize), DecompressError> {
    let limit = output.logical_len();
    let bytes = output.writable();
    checked_range(0, limit, bytes.len())?;
    Ok((bytes, limit))
}
