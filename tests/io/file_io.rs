// Integration tests for io/file_io.rs: source and destination opening.

use std::fs;
use std::io::{self, Read, Write};

use lzdecode::io::file_io::{is_dev_null, is_stdin, is_stdout, open_dst_file, open_src_file};
use lzdecode::io::{Prefs, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use tempfile::TempDir;

#[test]
fn sentinel_names() {
    assert!(is_stdin(STDIN_MARK));
    assert!(is_stdout(STDOUT_MARK));
    assert!(is_dev_null(NUL_MARK));
    assert!(!is_stdin("stdin.lz4"));
    assert!(!is_stdout("out"));
}

#[test]
fn source_file_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("src.lz4");
    fs::write(&path, b"payload").unwrap();
    let mut s = String::new();
    open_src_file(path.to_str().unwrap()).unwrap().read_to_string(&mut s).unwrap();
    assert_eq!(s, "payload");
}

#[test]
fn missing_source_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.lz4");
    let err = open_src_file(path.to_str().unwrap()).err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn directory_source_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = open_src_file(dir.path().to_str().unwrap()).err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}

#[test]
fn destination_is_created_and_truncated_with_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dst");
    fs::write(&path, b"a much longer previous content").unwrap();
    let prefs = Prefs {
        overwrite: true,
        ..Prefs::default()
    };
    {
        let mut f = open_dst_file(path.to_str().unwrap(), &prefs).unwrap();
        assert!(!f.is_stdout);
        f.write_all(b"new").unwrap();
        f.flush().unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"new");
}

#[test]
fn existing_destination_without_overwrite_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dst");
    fs::write(&path, b"old").unwrap();
    let err = open_dst_file(path.to_str().unwrap(), &Prefs::default()).err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
}

#[test]
fn test_mode_destination_is_a_sink() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("never-created");
    let prefs = Prefs {
        test_mode: true,
        ..Prefs::default()
    };
    let mut f = open_dst_file(path.to_str().unwrap(), &prefs).unwrap();
    f.write_all(b"discarded").unwrap();
    assert!(!path.exists());
}

#[test]
fn stdout_destination_is_flagged() {
    let f = open_dst_file(STDOUT_MARK, &Prefs::default()).unwrap();
    assert!(f.is_stdout);
}
