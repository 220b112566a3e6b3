// Integration tests for the LZO1X block decoder
//
// Covers:
//   - Round trips against blocks produced by the lzokay encoder
//   - Fixed reference blocks with known decodings
//   - Hand-built blocks for the state-dependent short commands
//   - End-of-block marker handling: missing, non-canonical, trailing bytes
//   - Malformed input never escapes the output region

use lzdecode::lzo::{decompress, decompress_at, decompress_to_vec, max_compressed_length, END_MARKER};
use lzdecode::{DecompressError, Malformed};

use crate::codecs::compress_lzo;
use crate::data;

fn reason(r: Result<usize, DecompressError>) -> Option<Malformed> {
    r.err().and_then(|e| e.reason())
}

fn decode_exact(block: &[u8], len: usize) -> Result<Vec<u8>, DecompressError> {
    let mut out = vec![0u8; len];
    let n = decompress(block, &mut out[..])?;
    out.truncate(n);
    Ok(out)
}

fn with_end_marker(body: &[u8]) -> Vec<u8> {
    let mut block = body.to_vec();
    block.extend_from_slice(&END_MARKER);
    block
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn round_trip_encoded_blocks() {
    for (name, original) in data::samples() {
        let block = compress_lzo(&original);
        assert!(block.len() <= max_compressed_length(original.len()), "{name}");
        let decoded = decode_exact(&block, original.len())
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(decoded, original, "{name}");
    }
}

#[test]
fn lzokay_reference_vector() {
    // 512 zero bytes as published with the lzokay crate: one literal, an
    // extended M3 match at distance 1, then the end marker.
    let block = [0x12, 0x00, 0x20, 0x00, 0xdf, 0x00, 0x00, 0x11, 0x00, 0x00];
    assert_eq!(decode_exact(&block, 512).unwrap(), vec![0u8; 512]);
    assert_eq!(reason(decompress(&block[..], &mut [0u8; 511][..])), Some(Malformed::OutputOverrun));
}

#[test]
fn round_trip_long_literal_run() {
    let original = data::noise(5_000, 21);
    let block = compress_lzo(&original);
    assert_eq!(decompress_to_vec(&block[..], original.len()).unwrap(), original);
}

#[test]
fn round_trip_with_spare_output_capacity() {
    let original = data::text(20_000, 22);
    let block = compress_lzo(&original);
    assert_eq!(decompress_to_vec(&block[..], original.len() * 2).unwrap(), original);
}

#[test]
fn decoding_is_deterministic() {
    let original = data::runs(40_000, 23);
    let block = compress_lzo(&original);
    let first = decompress_to_vec(&block[..], original.len()).unwrap();
    assert_eq!(first, original);
    assert_eq!(decompress_to_vec(&block[..], original.len()).unwrap(), first);
}

// ─────────────────────────────────────────────────────────────────────────────
// Hand-built blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn end_marker_alone_is_empty_block() {
    let mut out = [0u8; 0];
    assert_eq!(decompress(&END_MARKER, &mut out), Ok(0));
}

#[test]
fn first_byte_literal_run() {
    let block = with_end_marker(&[20, b'x', b'y', b'z']);
    assert_eq!(decode_exact(&block, 3).unwrap(), b"xyz");
}

#[test]
fn m2_match() {
    // "abcd", then length 4 at distance 4.
    let block = with_end_marker(&[21, b'a', b'b', b'c', b'd', 0x6C, 0x00]);
    assert_eq!(decode_exact(&block, 8).unwrap(), b"abcdabcd");
}

#[test]
fn m3_match_overlapping_previous_byte() {
    // "a", then length 10 at distance 1.
    let block = with_end_marker(&[18, b'a', 0x28, 0x00, 0x00]);
    assert_eq!(decode_exact(&block, 11).unwrap(), vec![b'a'; 11]);
}

#[test]
fn short_match_after_short_literal_run() {
    // After two literals a command below 16 is a 2-byte match.
    let block = with_end_marker(&[19, b'a', b'b', 0x04, 0x00]);
    assert_eq!(decode_exact(&block, 4).unwrap(), b"abab");

    // Same match carrying one trailing literal in its S bits.
    let block = with_end_marker(&[19, b'a', b'b', 0x05, 0x00, b'z']);
    assert_eq!(decode_exact(&block, 5).unwrap(), b"ababz");
}

#[test]
fn three_byte_match_after_long_literal_run() {
    // 18 + 8 * 255 + 42 = 2100 literals, then a command below 16 in the
    // long-literal state: length 3 at distance 2049.
    let literals = data::noise(2_100, 24);
    let mut body = vec![0x00];
    body.extend_from_slice(&[0x00; 8]);
    body.push(42);
    body.extend_from_slice(&literals);
    body.extend_from_slice(&[0x00, 0x00]);
    let block = with_end_marker(&body);

    let out = decode_exact(&block, 2_103).unwrap();
    assert_eq!(&out[..2_100], &literals[..]);
    assert_eq!(&out[2_100..], &literals[51..54]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Malformed input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_is_malformed() {
    let mut out = [0u8; 16];
    assert_eq!(reason(decompress(&[], &mut out)), Some(Malformed::EmptyInput));
}

#[test]
fn missing_end_marker_is_malformed() {
    let mut out = [0u8; 16];
    assert_eq!(
        reason(decompress(&[20, b'x', b'y', b'z'], &mut out)),
        Some(Malformed::MissingEndMarker)
    );
}

#[test]
fn bytes_after_end_marker_are_malformed() {
    let mut out = [0u8; 16];
    let block = [20, b'x', b'y', b'z', 0x11, 0x00, 0x00, 0x00];
    assert_eq!(reason(decompress(&block, &mut out)), Some(Malformed::TrailingInput));
}

#[test]
fn non_canonical_end_marker_is_malformed() {
    let mut out = [0u8; 16];
    assert_eq!(
        reason(decompress(&[0x11, 0x01, 0x00], &mut out)),
        Some(Malformed::InvalidEndMarker)
    );
    assert_eq!(
        reason(decompress(&[0x12, 0x00, 0x00], &mut out)),
        Some(Malformed::InvalidEndMarker)
    );
}

#[test]
fn match_before_block_start_is_malformed() {
    let mut out = [0u8; 64];
    // "a", then length 3 at distance 2.
    let block = with_end_marker(&[18, b'a', 0x44, 0x00]);
    assert_eq!(
        reason(decompress(&block[..], &mut out)),
        Some(Malformed::OffsetBeforeStart)
    );
}

#[test]
fn output_too_small_is_malformed() {
    let original = data::text(5_000, 25);
    let block = compress_lzo(&original);
    let mut out = vec![0u8; original.len() - 1];
    assert_eq!(reason(decompress(&block[..], &mut out[..])), Some(Malformed::OutputOverrun));
}

#[test]
fn every_strict_prefix_is_malformed() {
    let original = data::text(3_000, 26);
    let block = compress_lzo(&original);
    for cut in 0..block.len() {
        let err = decode_exact(&block[..cut], original.len()).unwrap_err();
        assert!(err.is_malformed(), "cut at {cut}: {err:?}");
    }
}

#[test]
fn corrupted_blocks_never_panic() {
    let original = data::runs(4_000, 27);
    let block = compress_lzo(&original);
    let mut rng = data::Rng::new(28);
    for _ in 0..2_000 {
        let mut bad = block.clone();
        let i = rng.below(bad.len());
        bad[i] = rng.next_u64() as u8;
        let mut out = vec![0u8; original.len()];
        if let Err(e) = decompress(&bad[..], &mut out[..]) {
            assert!(e.is_malformed());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Offset form
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decompress_at_leaves_canaries_intact() {
    let original = data::text(1_500, 29);
    let block = compress_lzo(&original);

    let mut input = vec![0x11; 5];
    input.extend_from_slice(&block);
    input.extend_from_slice(&[0x00; 3]);

    let mut output = vec![0x3Cu8; original.len() + 40];
    let n = decompress_at(&input, 5, block.len(), &mut output, 16, original.len()).unwrap();
    assert_eq!(n, original.len());
    assert_eq!(&output[16..16 + n], &original[..]);
    assert!(output[..16].iter().all(|&b| b == 0x3C));
    assert!(output[16 + n..].iter().all(|&b| b == 0x3C));
}

#[test]
fn decompress_at_ignores_bytes_past_input_length() {
    // The bytes after the block would be trailing input if they were counted.
    let mut input = with_end_marker(&[20, b'x', b'y', b'z']);
    input.extend_from_slice(&[0xFF; 4]);
    let mut output = [0u8; 3];
    assert_eq!(decompress_at(&input, 0, 7, &mut output, 0, 3), Ok(3));
    assert_eq!(&output, b"xyz");
}
