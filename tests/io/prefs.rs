// Integration tests for Prefs and the environment-driven config defaults.

use lzdecode::config::{
    init_max_chunk_size_from, init_nb_workers_from, parse_size, resolve_nb_workers, DEFAULT_MAX_CHUNK_SIZE,
    MAX_CHUNK_SIZE_LIMIT, NB_WORKERS_DEFAULT, NB_WORKERS_MAX,
};
use lzdecode::io::{InputLayout, Prefs};
use lzdecode::Codec;

#[test]
fn default_prefs_decode_block_streams_by_extension() {
    let p = Prefs::default();
    assert_eq!(p.codec, None);
    assert_eq!(p.layout, InputLayout::BlockStream);
    assert_eq!(p.max_chunk_size, DEFAULT_MAX_CHUNK_SIZE);
    assert_eq!(p.nb_workers, NB_WORKERS_DEFAULT);
    assert!(!p.overwrite && !p.test_mode && !p.remove_src_file);
}

#[test]
fn with_codec_sets_only_the_codec() {
    let p = Prefs::default().with_codec(Codec::Lzo);
    assert_eq!(p.codec, Some(Codec::Lzo));
    assert_eq!(
        Prefs {
            codec: None,
            ..p
        },
        Prefs::default()
    );
}

#[test]
fn size_strings() {
    assert_eq!(parse_size("4096"), Some(4096));
    assert_eq!(parse_size("64K"), Some(64 * 1024));
    assert_eq!(parse_size("2MiB"), Some(2 << 20));
    assert_eq!(parse_size("lots"), None);
}

#[test]
fn environment_overrides_fall_back_on_bad_values() {
    assert_eq!(init_nb_workers_from(Some("4")), 4);
    assert_eq!(init_nb_workers_from(Some("four")), NB_WORKERS_DEFAULT);
    assert_eq!(init_nb_workers_from(Some("100000")), NB_WORKERS_MAX);
    assert_eq!(init_nb_workers_from(None), NB_WORKERS_DEFAULT);

    assert_eq!(init_max_chunk_size_from(Some("1M")), 1 << 20);
    assert_eq!(init_max_chunk_size_from(Some("0")), DEFAULT_MAX_CHUNK_SIZE);
    assert_eq!(init_max_chunk_size_from(None), DEFAULT_MAX_CHUNK_SIZE);
    assert!(init_max_chunk_size_from(Some("1G")) <= MAX_CHUNK_SIZE_LIMIT);
}

#[test]
fn auto_worker_count_is_at_least_one() {
    assert!(resolve_nb_workers(0) >= 1);
    assert_eq!(resolve_nb_workers(3), 3);
}
