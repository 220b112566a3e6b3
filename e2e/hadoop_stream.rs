// e2e/hadoop_stream.rs: Hadoop block-stream scenarios end to end
//
// Large multi-block files through both the library file API and the binary,
// chunk-size limits from the command line and the environment.

#[path = "../tests/support/data.rs"]
mod data;
#[path = "../tests/support/hadoop.rs"]
mod hadoop;
#[path = "../tests/support/codecs.rs"]
mod codecs;

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::Command;

use lzdecode::io::{decompress_filename, BlockStreamReader, Prefs};
use lzdecode::Codec;
use tempfile::TempDir;

fn lzdecode_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lzdecode"))
}

fn mixed_corpus() -> Vec<u8> {
    let mut v = data::text(400_000, 201);
    v.extend(data::runs(300_000, 202));
    v.extend(data::noise(50_000, 203));
    v.extend(data::far_repeats(250_000, 40_000, 204));
    v
}

// ── Library ──────────────────────────────────────────────────────────────────

#[test]
fn large_streams_round_trip_through_file_api() {
    let original = mixed_corpus();
    let dir = TempDir::new().unwrap();
    for (codec, name) in [(Codec::Lz4, "big.lz4"), (Codec::Lzo, "big.lzo")] {
        let src = dir.path().join(name);
        fs::write(&src, hadoop::encode_stream(codec, &original, 256 * 1024, 64 * 1024)).unwrap();
        let dst = dir.path().join(format!("{name}.out"));

        let stats = decompress_filename(src.to_str().unwrap(), dst.to_str().unwrap(), &Prefs::default()).unwrap();
        assert_eq!(stats.decompressed_bytes, original.len() as u64, "{codec}");
        assert_eq!(fs::read(&dst).unwrap(), original, "{codec}");
    }
}

#[test]
fn one_chunk_per_block_and_many_chunks_per_block_agree() {
    let original = mixed_corpus();
    for codec in Codec::ALL {
        let coarse = hadoop::encode_stream(codec, &original, 256 * 1024, 256 * 1024);
        let fine = hadoop::encode_stream(codec, &original, 256 * 1024, 4 * 1024);
        let mut a = Vec::new();
        let mut b = Vec::new();
        BlockStreamReader::new(&coarse[..], codec).read_to_end(&mut a).unwrap();
        BlockStreamReader::new(&fine[..], codec).read_to_end(&mut b).unwrap();
        assert_eq!(a, original, "{codec}");
        assert_eq!(b, original, "{codec}");
    }
}

#[test]
fn concatenated_streams_decode_as_one() {
    let first = data::text(70_000, 205);
    let second = data::runs(70_000, 206);
    let mut stream = hadoop::encode_stream(Codec::Lz4, &first, 32 * 1024, 32 * 1024);
    stream.extend(hadoop::encode_stream(Codec::Lz4, &second, 50_000, 10_000));

    let mut out = Vec::new();
    BlockStreamReader::new(&stream[..], Codec::Lz4).read_to_end(&mut out).unwrap();
    assert_eq!(out.len(), first.len() + second.len());
    assert_eq!(&out[..first.len()], &first[..]);
    assert_eq!(&out[first.len()..], &second[..]);
}

// ── Binary ───────────────────────────────────────────────────────────────────

#[test]
fn binary_decodes_large_stream() {
    let original = mixed_corpus();
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("big.lzo"),
        hadoop::encode_stream(Codec::Lzo, &original, 256 * 1024, 256 * 1024),
    )
    .unwrap();

    let out = Command::new(lzdecode_bin())
        .args(["big.lzo", "-c"])
        .current_dir(dir.path())
        .env_remove("LZDECODE_MAX_CHUNK")
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.stdout, original);
}

#[test]
fn max_chunk_limit_from_flag_and_environment() {
    let original = data::text(100_000, 207);
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("c.lz4"),
        hadoop::encode_stream(Codec::Lz4, &original, 100_000, 64 * 1024),
    )
    .unwrap();

    let status = |args: &[&str], env: Option<&str>| {
        let mut cmd = Command::new(lzdecode_bin());
        cmd.args(args).current_dir(dir.path()).env_remove("LZDECODE_MAX_CHUNK");
        if let Some(v) = env {
            cmd.env("LZDECODE_MAX_CHUNK", v);
        }
        cmd.output().unwrap().status.success()
    };

    assert!(status(&["-t", "c.lz4"], None));
    assert!(!status(&["-t", "-B", "32K", "c.lz4"], None));
    assert!(status(&["-t", "-B", "64K", "c.lz4"], None));
    assert!(!status(&["-t", "c.lz4"], Some("16K")));
    // The flag wins over the environment.
    assert!(status(&["-t", "-B", "1M", "c.lz4"], Some("16K")));
}
