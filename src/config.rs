// config.rs: Compile-time configuration constants and environment overrides.
//
// Every override has a `*_from(Option<&str>)` core so the parsing can be unit
// tested without touching the process environment.

use crate::cli::constants::display_level;

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// Extra bytes allocated behind every decode buffer owned by the framing layer.
// Lets literal and match copies use 8-byte steps up to the logical end.
pub const HEADROOM: usize = 8;

// Largest uncompressed chunk a block stream may declare by default.
// Can be overridden by LZDECODE_MAX_CHUNK or --max-chunk.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 256 * KB;

// Hard cap on the chunk size accepted from any source.
pub const MAX_CHUNK_SIZE_LIMIT: usize = 64 * MB;

// Default number of worker threads (0 = one per logical CPU).
// Can be overridden by LZDECODE_NBWORKERS or -T#.
pub const NB_WORKERS_DEFAULT: usize = 0;

// Maximum number of worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

pub const ENV_NBWORKERS: &str = "LZDECODE_NBWORKERS";
pub const ENV_MAX_CHUNK: &str = "LZDECODE_MAX_CHUNK";

/// Parses a byte size with an optional `K`/`KB`/`KiB` or `M`/`MB`/`MiB` suffix.
pub fn parse_size(s: &str) -> Option<usize> {
    let s = s.trim();
    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digits_end == 0 {
        return None;
    }
    let value: usize = s[..digits_end].parse().ok()?;
    let multiplier = match &s[digits_end..] {
        "" => 1,
        "K" | "KB" | "KiB" => KB,
        "M" | "MB" | "MiB" => MB,
        _ => return None,
    };
    value.checked_mul(multiplier)
}

/// Number of worker threads from `LZDECODE_NBWORKERS`, or the default.
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Testable core of [`init_nb_workers`].
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        match env.trim().parse::<usize>() {
            Ok(n) => return n.min(NB_WORKERS_MAX),
            Err(_) => {
                if display_level() >= 2 {
                    eprintln!(
                        "Ignore environment variable setting {}={}: not a valid unsigned value ",
                        ENV_NBWORKERS, env
                    );
                }
            }
        }
    }
    NB_WORKERS_DEFAULT
}

/// Maximum chunk size from `LZDECODE_MAX_CHUNK`, or the default.
pub fn init_max_chunk_size() -> usize {
    init_max_chunk_size_from(std::env::var(ENV_MAX_CHUNK).ok().as_deref())
}

/// Testable core of [`init_max_chunk_size`].
pub fn init_max_chunk_size_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        match parse_size(env) {
            Some(n) if n > 0 && n <= MAX_CHUNK_SIZE_LIMIT => return n,
            _ => {
                if display_level() >= 2 {
                    eprintln!(
                        "Ignore environment variable setting {}={}: expected a size between 1 and {} ",
                        ENV_MAX_CHUNK, env, MAX_CHUNK_SIZE_LIMIT
                    );
                }
            }
        }
    }
    DEFAULT_MAX_CHUNK_SIZE
}

/// Resolves a worker count of 0 to the number of logical CPUs.
pub fn resolve_nb_workers(requested: usize) -> usize {
    match requested {
        0 => num_cpus::get().clamp(1, NB_WORKERS_MAX),
        n => n.min(NB_WORKERS_MAX),
    }
}
