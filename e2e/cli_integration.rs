// e2e/cli_integration.rs: CLI integration tests
//
// Drives the `lzdecode` binary as a black box with std::process::Command.
// Covers destination selection, codec inference and --format, raw blocks,
// test mode, the overwrite guard, source removal and verbosity flags.

#[path = "../tests/support/data.rs"]
mod data;
#[path = "../tests/support/hadoop.rs"]
mod hadoop;
#[path = "../tests/support/codecs.rs"]
mod codecs;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

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
        .env_remove("LZDECODE_NBWORKERS")
        .output()
        .expect("failed to run lzdecode")
}

fn run_with_stdin(dir: &Path, args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(lzdecode_bin())
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn lzdecode");
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn write_stream(dir: &Path, name: &str, codec: Codec, original: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, hadoop::encode_stream(codec, original, 128 * 1024, 32 * 1024)).unwrap();
    path
}

// ── 1. Destinations ──────────────────────────────────────────────────────────

#[test]
fn decodes_beside_source_by_extension() {
    let dir = TempDir::new().unwrap();
    let a = data::text(200_000, 101);
    let b = data::runs(90_000, 102);
    write_stream(dir.path(), "a.lz4", Codec::Lz4, &a);
    write_stream(dir.path(), "b.lzo_deflate", Codec::Lzo, &b);

    let out = run(dir.path(), &["a.lz4", "b.lzo_deflate"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("a")).unwrap(), a);
    assert_eq!(fs::read(dir.path().join("b")).unwrap(), b);
    assert!(dir.path().join("a.lz4").exists(), "sources are kept by default");
}

#[test]
fn explicit_output_file() {
    let dir = TempDir::new().unwrap();
    let original = data::text(20_000, 103);
    write_stream(dir.path(), "in.lzo", Codec::Lzo, &original);

    let out = run(dir.path(), &["-o", "decoded.txt", "in.lzo"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("decoded.txt")).unwrap(), original);
}

#[test]
fn stdout_concatenates_in_input_order() {
    let dir = TempDir::new().unwrap();
    write_stream(dir.path(), "1.lz4", Codec::Lz4, b"first,");
    write_stream(dir.path(), "2.lzo", Codec::Lzo, b"second,");
    write_stream(dir.path(), "3.lz4", Codec::Lz4, b"third");

    let out = run(dir.path(), &["-c", "1.lz4", "2.lzo", "3.lz4"]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"first,second,third");
    assert!(!dir.path().join("1").exists());
}

#[test]
fn stdin_to_stdout_with_format() {
    let dir = TempDir::new().unwrap();
    let original = data::text(50_000, 104);
    let stream = hadoop::encode_stream(Codec::Lzo, &original, 64 * 1024, 64 * 1024);

    let out = run_with_stdin(dir.path(), &["-F", "lzo"], &stream);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.stdout, original);
}

#[test]
fn stdin_without_format_is_bad_usage() {
    let dir = TempDir::new().unwrap();
    let out = run_with_stdin(dir.path(), &[], b"");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--format"));
}

// ── 2. Codec selection and layouts ───────────────────────────────────────────

#[test]
fn format_flag_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let original = data::text(8_000, 105);
    write_stream(dir.path(), "blob.bin", Codec::Lz4, &original);

    let out = run(dir.path(), &["blob.bin", "-o", "x"]);
    assert!(!out.status.success(), "unknown extension must fail");

    let out = run(dir.path(), &["-F", "lz4", "blob.bin", "-o", "x"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("x")).unwrap(), original);
}

#[test]
fn raw_block_with_size() {
    let dir = TempDir::new().unwrap();
    let original = data::runs(30_000, 106);
    fs::write(dir.path().join("raw.lzo"), codecs::compress_lzo(&original)).unwrap();

    let out = run(dir.path(), &["--raw", "-s", "30000", "raw.lzo", "-c"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.stdout, original);

    let out = run(dir.path(), &["--raw", "-s", "29999", "raw.lzo", "-c"]);
    assert!(!out.status.success(), "size below the decoded length must fail");
}

#[test]
fn raw_without_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["--raw", "x.lz4"]);
    assert!(!out.status.success());
}

// ── 3. Modes ─────────────────────────────────────────────────────────────────

#[test]
fn test_mode_writes_no_files() {
    let dir = TempDir::new().unwrap();
    write_stream(dir.path(), "t.lz4", Codec::Lz4, &data::text(10_000, 107));

    let out = run(dir.path(), &["-t", "--rm", "t.lz4"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!dir.path().join("t").exists());
    assert!(dir.path().join("t.lz4").exists());
}

#[test]
fn existing_output_needs_force() {
    let dir = TempDir::new().unwrap();
    let original = data::text(3_000, 108);
    write_stream(dir.path(), "f.lz4", Codec::Lz4, &original);
    fs::write(dir.path().join("f"), b"old").unwrap();

    let out = run(dir.path(), &["f.lz4"]);
    assert!(!out.status.success());
    assert_eq!(fs::read(dir.path().join("f")).unwrap(), b"old");

    let out = run(dir.path(), &["-f", "f.lz4"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("f")).unwrap(), original);
}

#[test]
fn rm_removes_sources_after_success() {
    let dir = TempDir::new().unwrap();
    write_stream(dir.path(), "r.lzo", Codec::Lzo, b"short lived");

    let out = run(dir.path(), &["--rm", "r.lzo"]);
    assert!(out.status.success());
    assert!(!dir.path().join("r.lzo").exists());
    assert_eq!(fs::read(dir.path().join("r")).unwrap(), b"short lived");
}

#[test]
fn quiet_suppresses_summary() {
    let dir = TempDir::new().unwrap();
    write_stream(dir.path(), "q.lz4", Codec::Lz4, b"quiet please");

    let out = run(dir.path(), &["-q", "q.lz4"]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn threads_flag_is_accepted() {
    let dir = TempDir::new().unwrap();
    let names: Vec<String> = (0..8).map(|i| format!("p{i}.lz4")).collect();
    for (i, name) in names.iter().enumerate() {
        write_stream(dir.path(), name, Codec::Lz4, &data::text(5_000, 110 + i as u64));
    }
    let mut args = vec!["-T", "3"];
    args.extend(names.iter().map(String::as_str));

    let out = run(dir.path(), &args);
    assert!(out.status.success());
    for i in 0..8 {
        assert_eq!(
            fs::read(dir.path().join(format!("p{i}"))).unwrap(),
            data::text(5_000, 110 + i as u64)
        );
    }
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(lzdecode::VERSION_STRING));
}
