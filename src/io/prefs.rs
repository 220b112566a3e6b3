// prefs.rs: Decoding preferences shared by the file-level entry points.

use crate::config::{init_max_chunk_size, init_nb_workers, DEFAULT_MAX_CHUNK_SIZE, NB_WORKERS_DEFAULT};
use crate::Codec;

/// How the input bytes are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLayout {
    /// Hadoop block stream: length-prefixed blocks of length-prefixed chunks.
    BlockStream,
    /// One raw block whose uncompressed size is known up front.
    RawBlock { size: usize },
}

/// Preferences for file decoding.  Plain value type; cheap to clone into
/// worker threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefs {
    /// Codec to use; `None` infers it from each file's extension.
    pub codec: Option<Codec>,
    pub layout: InputLayout,
    /// Largest uncompressed chunk accepted from a block stream.
    pub max_chunk_size: usize,
    /// Overwrite existing destination files.
    pub overwrite: bool,
    /// Decode and discard the output.
    pub test_mode: bool,
    /// Worker threads for multi-file decoding; 0 = one per logical CPU.
    pub nb_workers: usize,
    /// Remove the source file after a successful decode.
    pub remove_src_file: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            codec: None,
            layout: InputLayout::BlockStream,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            overwrite: false,
            test_mode: false,
            nb_workers: NB_WORKERS_DEFAULT,
            remove_src_file: false,
        }
    }
}

impl Prefs {
    /// Defaults with the environment overrides applied.
    pub fn from_env() -> Self {
        Prefs {
            max_chunk_size: init_max_chunk_size(),
            nb_workers: init_nb_workers(),
            ..Prefs::default()
        }
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = Some(codec);
        self
    }
}
