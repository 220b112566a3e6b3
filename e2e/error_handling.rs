// e2e/error_handling.rs: failure paths of the binary
//
// Every malformed or truncated input must give a non-zero exit status, a
// diagnostic on stderr and no leftover output file.

#[path = "../tests/support/data.rs"]
mod data;
#[path = "../tests/support/hadoop.rs"]
mod hadoop;
#[path = "../tests/support/codecs.rs"]
mod codecs;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use lzdecode::Codec;
use tempfile::TempDir;

fn lzdecode_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lzdecode"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(lzdecode_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("LZDECODE_MAX_CHUNK")
        .output()
        .expect("failed to run lzdecode")
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn truncated_stream_fails_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let mut stream = hadoop::encode_stream(Codec::Lz4, &data::text(40_000, 301), 40_000, 8_192);
    stream.truncate(stream.len() / 2);
    fs::write(dir.path().join("cut.lz4"), stream).unwrap();

    let out = run(dir.path(), &["cut.lz4"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cut.lz4"), "{}", stderr(&out));
    assert!(!dir.path().join("cut").exists());
}

#[test]
fn truncated_header_reports_truncation() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("h.lzo"), [0x00, 0x00, 0x10]).unwrap();

    let out = run(dir.path(), &["h.lzo", "-c"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Stream is truncated"), "{}", stderr(&out));
}

#[test]
fn corrupt_lzo_chunk_is_reported_as_malformed() {
    let dir = TempDir::new().unwrap();
    let original = data::text(10_000, 302);
    let mut stream = hadoop::encode_stream(Codec::Lzo, &original, 10_000, 10_000);
    // Replace the end-of-block marker with a non-canonical one.
    let n = stream.len();
    stream[n - 2] = 0x01;
    fs::write(dir.path().join("bad.lzo"), stream).unwrap();

    let out = run(dir.path(), &["bad.lzo"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("malformed input"), "{}", stderr(&out));
    assert!(!dir.path().join("bad").exists());
}

#[test]
fn zero_offset_in_raw_lz4_block() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("z.lz4"), [0x11, b'A', 0x00, 0x00, 0x00]).unwrap();

    let out = run(dir.path(), &["--raw", "-s", "64", "z.lz4", "-c"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("match offset is zero"), "{}", stderr(&out));
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_input_file() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["absent.lz4"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("absent").exists());
}

#[test]
fn directory_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("d.lz4")).unwrap();
    let out = run(dir.path(), &["d.lz4"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn batch_reports_failure_count_but_decodes_the_rest() {
    let dir = TempDir::new().unwrap();
    let good = data::text(12_000, 303);
    fs::write(
        dir.path().join("ok.lzo"),
        hadoop::encode_stream(Codec::Lzo, &good, 12_000, 12_000),
    )
    .unwrap();
    fs::write(dir.path().join("broken.lzo"), [0, 0, 0, 5, 0, 0, 0, 2, 22, b'x']).unwrap();

    let out = run(dir.path(), &["ok.lzo", "broken.lzo"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("1 of 2"), "{}", stderr(&out));
    assert_eq!(fs::read(dir.path().join("ok")).unwrap(), good);
    assert!(!dir.path().join("broken").exists());
}

#[test]
fn bad_size_values_are_usage_errors() {
    let dir = TempDir::new().unwrap();
    for args in [
        &["--raw", "-s", "lots", "-F", "lz4", "x"][..],
        &["-B", "0", "x.lz4"][..],
        &["-s", "10", "x.lz4"][..],
    ] {
        let out = run(dir.path(), args);
        assert_eq!(out.status.code(), Some(1), "{args:?}");
        assert!(stderr(&out).contains("bad usage"), "{args:?}: {}", stderr(&out));
    }
}
