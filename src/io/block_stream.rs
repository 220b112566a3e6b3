//! Reader for Hadoop-style block streams of LZ4 or LZO1X data.
//!
//! The stream is a sequence of blocks.  Each block declares its total
//! uncompressed length and is followed by one or more compressed chunks, each
//! carrying its own compressed length.  All fields are big-endian `u32`:
//!
//! ```text
//! stream := block*
//! block  := uncompressed_len  chunk+          (until uncompressed_len bytes decoded)
//! chunk  := compressed_len  bytes[compressed_len]
//! ```
//!
//! A block with `uncompressed_len == 0` has no chunks and is skipped.  A clean
//! end of input is only accepted where a new block header would start.
//!
//! Each chunk is decoded with a single block-decoder call into a reused buffer
//! that carries [`HEADROOM`] spare bytes past its logical end.  The logical
//! limit of that call is what remains of the current block (capped by the
//! maximum chunk size), so a chunk that would produce more than its block
//! declared is rejected by the decoder itself.

use std::io::{self, Read};

use crate::buffer::SlackBuffer;
use crate::config::{DEFAULT_MAX_CHUNK_SIZE, HEADROOM, MAX_CHUNK_SIZE_LIMIT};
use crate::Codec;

/// Size of each length field in the stream.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Largest block length accepted.  Block lengths are signed 32-bit values in
/// the Hadoop framing.
pub const MAX_BLOCK_LENGTH: usize = i32::MAX as usize;

// ---------------------------------------------------------------------------
// Header helpers
// ---------------------------------------------------------------------------

/// Reads a big-endian `u32`.  Returns `Ok(None)` on a clean end of input
/// before the first byte; a partial field is an
/// [`io::ErrorKind::UnexpectedEof`] error.
fn read_be_u32_or_eof<R: Read>(src: &mut R) -> io::Result<Option<u32>> {
    let mut buf = [0u8; LENGTH_FIELD_SIZE];
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(truncated()),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(Some(u32::from_be_bytes(buf)))
}

fn truncated() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "Stream is truncated")
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

// ---------------------------------------------------------------------------
// BlockStreamReader
// ---------------------------------------------------------------------------

/// Decoding [`Read`] adapter over a block stream.
///
/// ```
/// use std::io::Read;
/// use lzdecode::{io::BlockStreamReader, Codec};
///
/// // One block of 4 bytes holding one LZ4 chunk of 5 bytes.
/// let stream = [0, 0, 0, 4, 0, 0, 0, 5, 0x40, b'T', b'E', b'S', b'T'];
/// let mut text = String::new();
/// BlockStreamReader::new(&stream[..], Codec::Lz4).read_to_string(&mut text).unwrap();
/// assert_eq!(text, "TEST");
/// ```
pub struct BlockStreamReader<R> {
    inner: R,
    codec: Codec,
    max_chunk_size: usize,
    /// Compressed chunk, followed by `HEADROOM` spare bytes.
    compressed: Vec<u8>,
    /// Decoded chunk buffer of `max_chunk_size + HEADROOM` bytes.
    chunk: Vec<u8>,
    chunk_len: usize,
    chunk_pos: usize,
    /// Bytes the current block still has to produce.
    block_remaining: usize,
    blocks: u64,
    chunks: u64,
}

impl<R: Read> BlockStreamReader<R> {
    pub fn new(inner: R, codec: Codec) -> Self {
        Self::with_max_chunk_size(inner, codec, DEFAULT_MAX_CHUNK_SIZE)
    }

    /// Accepts chunks that decode to at most `max_chunk_size` bytes, clamped
    /// to `1..=MAX_CHUNK_SIZE_LIMIT`.
    pub fn with_max_chunk_size(inner: R, codec: Codec, max_chunk_size: usize) -> Self {
        let max_chunk_size = max_chunk_size.clamp(1, MAX_CHUNK_SIZE_LIMIT);
        BlockStreamReader {
            inner,
            codec,
            max_chunk_size,
            compressed: Vec::new(),
            chunk: vec![0u8; max_chunk_size + HEADROOM],
            chunk_len: 0,
            chunk_pos: 0,
            block_remaining: 0,
            blocks: 0,
            chunks: 0,
        }
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Number of non-empty blocks and chunks decoded so far.
    pub fn counts(&self) -> (u64, u64) {
        (self.blocks, self.chunks)
    }

    /// Decodes the next chunk into the chunk buffer.  Returns `false` at a
    /// clean end of stream.
    fn fill_chunk(&mut self) -> io::Result<bool> {
        self.chunk_len = 0;
        self.chunk_pos = 0;

        while self.block_remaining == 0 {
            let len = match read_be_u32_or_eof(&mut self.inner)? {
                None => return Ok(false),
                Some(len) => len as usize,
            };
            if len > MAX_BLOCK_LENGTH {
                return Err(invalid(format!("invalid block length {}", len)));
            }
            if len > 0 {
                self.blocks += 1;
                log::debug!("{} block {}: {} bytes", self.codec, self.blocks, len);
            }
            self.block_remaining = len;
        }

        let compressed_len = read_be_u32_or_eof(&mut self.inner)?.ok_or_else(truncated)? as usize;
        let bound = self.codec.max_compressed_length(self.max_chunk_size);
        if compressed_len == 0 || compressed_len > bound {
            return Err(invalid(format!(
                "invalid compressed chunk length {} (max {})",
                compressed_len, bound
            )));
        }

        if self.compressed.len() < compressed_len + HEADROOM {
            self.compressed.resize(compressed_len + HEADROOM, 0);
        }
        self.inner
            .read_exact(&mut self.compressed[..compressed_len])
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "encountered EOF while reading block data",
                ),
                _ => e,
            })?;

        let limit = self.block_remaining.min(self.max_chunk_size);
        let input = SlackBuffer::new(&self.compressed[..], compressed_len)?;
        let mut output = SlackBuffer::new(&mut self.chunk[..], limit)?;
        let n = self.codec.decompress(&input, &mut output)?;
        if n == 0 {
            return Err(invalid(format!(
                "chunk decoded to no data with {} bytes of the block outstanding",
                self.block_remaining
            )));
        }

        self.chunks += 1;
        log::trace!("chunk {}: {} -> {} bytes", self.chunks, compressed_len, n);
        self.block_remaining -= n;
        self.chunk_len = n;
        Ok(true)
    }
}

impl<R: Read> Read for BlockStreamReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.chunk_pos >= self.chunk_len && !self.fill_chunk()? {
            return Ok(0);
        }
        let size = buf.len().min(self.chunk_len - self.chunk_pos);
        buf[..size].copy_from_slice(&self.chunk[self.chunk_pos..self.chunk_pos + size]);
        self.chunk_pos += size;
        Ok(size)
    }
}
