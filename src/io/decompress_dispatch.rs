//! Stream- and file-level decoding.
//!
//! - [`decode_block_stream`]: decodes a Hadoop block stream from any reader
//! - [`decode_raw_block`]: decodes a reader holding exactly one raw block
//! - [`decompress_filename`]: one source / destination pair
//! - [`decompress_multiple_filenames`]: many sources, either concatenated
//!   into one destination or decoded in parallel on a rayon pool, each
//!   written next to its source with the codec extension removed
//!
//! The codec of a file comes from [`Prefs::codec`] when set, otherwise from
//! the file's extension.

use std::fs;
use std::io::{self, Read, Write};
use std::time::Instant;

use rayon::prelude::*;

use crate::buffer::SlackBuffer;
use crate::config::{resolve_nb_workers, HEADROOM};
use crate::displaylevel;
use crate::io::block_stream::BlockStreamReader;
use crate::io::file_io::{is_dev_null, is_stdin, is_stdout, open_dst_file, open_src_file};
use crate::io::prefs::{InputLayout, Prefs};
use crate::Codec;

// ---------------------------------------------------------------------------
// Public stats
// ---------------------------------------------------------------------------

/// Statistics returned by the file-level entry points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecompressStats {
    /// Number of files decoded successfully.
    pub files: usize,
    /// Total number of decompressed bytes written to the output.
    pub decompressed_bytes: u64,
}

// ---------------------------------------------------------------------------
// Stream level
// ---------------------------------------------------------------------------

/// Decodes a block stream from `src` into `dst`; returns the decoded size.
pub fn decode_block_stream<R: Read, W: Write + ?Sized>(
    src: R,
    dst: &mut W,
    codec: Codec,
    max_chunk_size: usize,
) -> io::Result<u64> {
    let mut reader = BlockStreamReader::with_max_chunk_size(src, codec, max_chunk_size);
    let n = io::copy(&mut reader, dst)?;
    let (blocks, chunks) = reader.counts();
    log::debug!("{}: {} blocks, {} chunks, {} bytes", codec, blocks, chunks, n);
    Ok(n)
}

/// Decodes all of `src` as one raw block that must expand to exactly `size`
/// bytes; returns the decoded size.
pub fn decode_raw_block<R: Read, W: Write + ?Sized>(
    mut src: R,
    dst: &mut W,
    codec: Codec,
    size: usize,
) -> io::Result<u64> {
    let mut compressed = Vec::new();
    src.read_to_end(&mut compressed)?;
    let compressed_len = compressed.len();
    compressed.resize(compressed_len + HEADROOM, 0);

    let input = SlackBuffer::new(&compressed[..], compressed_len)?;
    let decoded = codec.decompress_to_vec(&input, size)?;
    if decoded.len() != size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("raw block decoded to {} bytes, expected {}", decoded.len(), size),
        ));
    }
    dst.write_all(&decoded)?;
    Ok(decoded.len() as u64)
}

/// Decodes `src` into `dst` following `prefs.layout`.
pub fn decode_stream<R: Read, W: Write + ?Sized>(
    src: R,
    dst: &mut W,
    codec: Codec,
    prefs: &Prefs,
) -> io::Result<u64> {
    match prefs.layout {
        InputLayout::BlockStream => decode_block_stream(src, dst, codec, prefs.max_chunk_size),
        InputLayout::RawBlock { size } => decode_raw_block(src, dst, codec, size),
    }
}

// ---------------------------------------------------------------------------
// File level
// ---------------------------------------------------------------------------

/// Picks the codec for `src`: the explicit preference, else its extension.
pub fn select_codec(src: &str, prefs: &Prefs) -> io::Result<Codec> {
    prefs.codec.or_else(|| Codec::from_path(src)).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: unknown extension, use --format to select a codec", src),
        )
    })
}

/// Derives the output name of `src` by removing its codec extension.
pub fn default_dst_name(src: &str, codec: Codec) -> io::Result<String> {
    codec
        .strip_extension(src)
        .map(str::to_owned)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{}: file extension doesn't match {}; cannot derive output name",
                    src,
                    codec.extensions().join(" or ")
                ),
            )
        })
}

fn decompress_src_to<W: Write + ?Sized>(src: &str, dst: &mut W, codec: Codec, prefs: &Prefs) -> io::Result<u64> {
    let reader = open_src_file(src)?;
    decode_stream(reader, dst, codec, prefs).map_err(|e| {
        io::Error::new(e.kind(), format!("{}: {}", src, e))
    })
}

fn remove_source(src: &str, prefs: &Prefs) -> io::Result<()> {
    if prefs.remove_src_file && !prefs.test_mode && !is_stdin(src) {
        fs::remove_file(src)?;
        displaylevel!(4, "removed {}\n", src);
    }
    Ok(())
}

/// Decodes the file `src` into `dst`.
///
/// `dst` may be a path, `"stdout"` or the null device.  A partially written
/// destination file is removed when decoding fails.
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<DecompressStats> {
    let start = Instant::now();
    let codec = select_codec(src, prefs)?;
    let mut out = open_dst_file(dst, prefs)?;

    let result = decompress_src_to(src, &mut out, codec, prefs).and_then(|n| {
        out.flush()?;
        Ok(n)
    });
    drop(out);

    match result {
        Ok(n) => {
            remove_source(src, prefs)?;
            displaylevel!(
                2,
                "{:<30}: decoded {} bytes ({}) in {:.2} s\n",
                src,
                n,
                codec,
                start.elapsed().as_secs_f64()
            );
            Ok(DecompressStats {
                files: 1,
                decompressed_bytes: n,
            })
        }
        Err(e) => {
            if !prefs.test_mode && !is_stdout(dst) && !is_dev_null(dst) {
                let _ = fs::remove_file(dst);
            }
            Err(e)
        }
    }
}

/// Decodes `srcs` one after another into a single writer, in input order.
fn decompress_sequentially<W: Write + ?Sized>(
    srcs: &[&str],
    out: &mut W,
    prefs: &Prefs,
) -> Vec<io::Result<DecompressStats>> {
    srcs.iter()
        .map(|&src| -> io::Result<DecompressStats> {
            let codec = select_codec(src, prefs)?;
            let n = decompress_src_to(src, out, codec, prefs)?;
            remove_source(src, prefs)?;
            Ok(DecompressStats {
                files: 1,
                decompressed_bytes: n,
            })
        })
        .collect()
}

/// Decodes many files.
///
/// With `shared_dst` set to `"stdout"` or a file path, all outputs are
/// concatenated there in input order, and a destination file is removed if
/// any source fails.  With the null device they are discarded.  Otherwise
/// each source is written next to itself with its codec extension removed.
/// Files that get their own destination are decoded concurrently on
/// `prefs.nb_workers` threads.
///
/// Every file is attempted; the error reports how many failed.
pub fn decompress_multiple_filenames(
    srcs: &[&str],
    shared_dst: Option<&str>,
    prefs: &Prefs,
) -> io::Result<DecompressStats> {
    let start = Instant::now();

    let results: Vec<io::Result<DecompressStats>> = match shared_dst {
        Some(dst) if is_stdout(dst) => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            let results = decompress_sequentially(srcs, &mut lock, prefs);
            lock.flush()?;
            results
        }
        Some(dst) if !is_dev_null(dst) => {
            let mut out = open_dst_file(dst, prefs)?;
            let results = decompress_sequentially(srcs, &mut out, prefs);
            let flushed = out.flush();
            drop(out);
            if !prefs.test_mode && (flushed.is_err() || results.iter().any(Result::is_err)) {
                let _ = fs::remove_file(dst);
            }
            flushed?;
            results
        }
        _ => {
            let nb_workers = resolve_nb_workers(prefs.nb_workers);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(nb_workers)
                .build()
                .map_err(|e| io::Error::other(e.to_string()))?;
            displaylevel!(4, "decoding {} files on {} threads\n", srcs.len(), nb_workers);
            pool.install(|| {
                srcs.par_iter()
                    .map(|&src| -> io::Result<DecompressStats> {
                        let dst = match shared_dst {
                            Some(dst) => dst.to_owned(),
                            None => default_dst_name(src, select_codec(src, prefs)?)?,
                        };
                        decompress_filename(src, &dst, prefs)
                    })
                    .collect()
            })
        }
    };

    let mut total = DecompressStats::default();
    let mut failures = 0;
    for r in results {
        match r {
            Ok(s) => {
                total.files += s.files;
                total.decompressed_bytes += s.decompressed_bytes;
            }
            Err(e) => {
                failures += 1;
                displaylevel!(1, "lzdecode: {}\n", e);
            }
        }
    }

    displaylevel!(
        2,
        "{} files decoded, {} bytes in {:.2} s\n",
        total.files,
        total.decompressed_bytes,
        start.elapsed().as_secs_f64()
    );

    if failures > 0 {
        Err(io::Error::other(format!(
            "{} of {} file(s) could not be decompressed",
            failures,
            srcs.len()
        )))
    } else {
        Ok(total)
    }
}
