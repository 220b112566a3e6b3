// Integration tests for the LZ4 block decoder
//
// Covers:
//   - Round trips against blocks produced by lz4_flex
//   - Hand-built blocks: literal-only, overlapping matches, extensions
//   - Every malformed shape: empty, truncated, zero / out-of-window offsets,
//     output overrun
//   - Output-limit behaviour and determinism

use lzdecode::lz4::{decompress, decompress_at, decompress_to_vec, max_compressed_length};
use lzdecode::{DecompressError, Malformed};

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

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn round_trip_lz4_flex_blocks() {
    for (name, original) in data::samples() {
        let block = lz4_flex::block::compress(&original);
        assert!(block.len() <= max_compressed_length(original.len()), "{name}");
        let decoded = decode_exact(&block, original.len())
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(decoded, original, "{name}");
    }
}

#[test]
fn round_trip_with_spare_output_capacity() {
    let original = data::text(10_000, 11);
    let block = lz4_flex::block::compress(&original);
    let decoded = decompress_to_vec(&block[..], original.len() + 4096).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn decoding_is_deterministic() {
    let original = data::runs(50_000, 12);
    let block = lz4_flex::block::compress(&original);
    let first = decompress_to_vec(&block[..], original.len()).unwrap();
    for _ in 0..3 {
        assert_eq!(decompress_to_vec(&block[..], original.len()).unwrap(), first);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hand-built blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn literal_only_block() {
    assert_eq!(decode_exact(&[0x40, b'T', b'E', b'S', b'T'], 4).unwrap(), b"TEST");
}

#[test]
fn zero_token_is_empty_block() {
    let mut out = [0u8; 0];
    assert_eq!(decompress(&[0x00], &mut out), Ok(0));
}

#[test]
fn overlapping_match_repeats_single_byte() {
    // 'A', then a match of 4 + 15 + 1 = 20 at distance 1, then an empty
    // final literal run.
    let block = [0x1F, b'A', 0x01, 0x00, 0x01, 0x00];
    assert_eq!(decode_exact(&block, 21).unwrap(), vec![b'A'; 21]);
}

#[test]
fn overlapping_match_with_period_three() {
    // "abc", match of 4 + 8 = 12 at distance 3, final literal "!".
    let block = [0x38, b'a', b'b', b'c', 0x03, 0x00, 0x10, b'!'];
    assert_eq!(decode_exact(&block, 16).unwrap(), b"abcabcabcabcabc!");
}

#[test]
fn long_literal_extension() {
    // 15 + 255 + 30 = 300 literals.
    let payload = data::noise(300, 13);
    let mut block = vec![0xF0, 255, 30];
    block.extend_from_slice(&payload);
    assert_eq!(decode_exact(&block, 300).unwrap(), payload);
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
fn zero_offset_is_malformed() {
    let mut out = [0u8; 64];
    let block = [0x11, b'A', 0x00, 0x00, 0x00];
    assert_eq!(reason(decompress(&block, &mut out)), Some(Malformed::ZeroOffset));
}

#[test]
fn offset_before_block_start_is_malformed() {
    let mut out = [0u8; 64];
    let block = [0x10, b'A', 0x02, 0x00, 0x00];
    assert_eq!(
        reason(decompress(&block, &mut out)),
        Some(Malformed::OffsetBeforeStart)
    );
}

#[test]
fn literal_run_past_input_is_malformed() {
    let mut out = [0u8; 64];
    assert_eq!(
        reason(decompress(&[0x50, b'a', b'b'], &mut out)),
        Some(Malformed::LiteralOverrun)
    );
}

#[test]
fn unterminated_length_extension_is_malformed() {
    let mut out = [0u8; 1024];
    assert_eq!(
        reason(decompress(&[0xF0, 255, 255], &mut out)),
        Some(Malformed::TruncatedLength)
    );
}

#[test]
fn output_too_small_is_malformed() {
    let original = data::text(5_000, 14);
    let block = lz4_flex::block::compress(&original);
    let mut out = vec![0u8; original.len() - 1];
    assert_eq!(reason(decompress(&block[..], &mut out[..])), Some(Malformed::OutputOverrun));
}

#[test]
fn every_prefix_fails_or_comes_up_short() {
    // A cut right after a sequence's literals is itself a well-formed block;
    // it decodes to a strict prefix, which the framing layer rejects against
    // the declared length.
    let original = data::text(3_000, 15);
    let block = lz4_flex::block::compress(&original);
    for cut in 0..block.len() {
        match decode_exact(&block[..cut], original.len()) {
            Ok(out) => {
                assert!(out.len() < original.len(), "cut at {cut}");
                assert!(original.starts_with(&out), "cut at {cut}");
            }
            Err(e) => assert!(e.is_malformed(), "cut at {cut}: {e:?}"),
        }
    }
}

#[test]
fn every_prefix_fails_as_a_sized_raw_block() {
    let original = data::text(3_000, 19);
    let block = lz4_flex::block::compress(&original);
    for cut in 0..block.len() {
        let mut out = Vec::new();
        let err = lzdecode::io::decode_raw_block(&block[..cut], &mut out, lzdecode::Codec::Lz4, original.len())
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData, "cut at {cut}");
        assert!(out.is_empty());
    }
}

#[test]
fn corrupted_blocks_never_panic() {
    let original = data::text(2_000, 16);
    let block = lz4_flex::block::compress(&original);
    let mut rng = data::Rng::new(17);
    for _ in 0..2_000 {
        let mut bad = block.clone();
        let i = rng.below(bad.len());
        bad[i] ^= 1 << rng.below(8);
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
    let original = data::text(1_000, 18);
    let block = lz4_flex::block::compress(&original);

    let mut input = vec![0x5A; 7];
    input.extend_from_slice(&block);
    input.extend_from_slice(&[0x5A; 9]);

    let mut output = vec![0xC3u8; original.len() + 64];
    let n = decompress_at(&input, 7, block.len(), &mut output, 32, original.len()).unwrap();
    assert_eq!(n, original.len());
    assert_eq!(&output[32..32 + n], &original[..]);
    assert!(output[..32].iter().all(|&b| b == 0xC3));
    assert!(output[32 + n..].iter().all(|&b| b == 0xC3));
}

#[test]
fn decompress_at_rejects_ranges_outside_arrays() {
    let mut output = [0u8; 8];
    let err = decompress_at(&[0x00], 0, 2, &mut output, 0, 8).unwrap_err();
    assert!(matches!(err, DecompressError::InvalidRange { .. }));
    assert!(!err.is_malformed());
    let err = decompress_at(&[0x00], 0, 1, &mut output, 9, 0).unwrap_err();
    assert!(matches!(err, DecompressError::InvalidRange { .. }));
}
