// cli/constants.rs: Program identity, display level, and display macros.

use std::sync::atomic::{AtomicU32, Ordering};

// ── String / identity constants ───────────────────────────────────────────────
pub const PROGRAM_NAME: &str = "lzdecode";
pub const AUTHOR: &str = "the lzdecode authors";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal (downgradable); 3 = non-downgradable;
// 4 = verbose, forwards library `debug!` records; 5 = forwards `trace!` records.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(DISPLAY_LEVEL_DEFAULT);

pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;

/// Highest meaningful display level.
pub const DISPLAY_LEVEL_MAX: u32 = 5;

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level.min(DISPLAY_LEVEL_MAX), Ordering::Relaxed);
}

// ── Display helpers ───────────────────────────────────────────────────────────

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

// ── log bridge ────────────────────────────────────────────────────────────────
//
// The library reports through the `log` facade.  The binary routes those
// records to stderr, gated by the display level rather than a separate
// logger configuration.

/// Maps a display level to the most verbose `log` level it shows.
pub fn level_filter_for(display_level: u32) -> log::LevelFilter {
    match display_level {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Error,
        2 | 3 => log::LevelFilter::Warn,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

struct DisplayLogger;

impl log::Log for DisplayLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= level_filter_for(display_level())
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level().as_str().to_lowercase(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: DisplayLogger = DisplayLogger;

/// Installs the stderr logger and sets the `log` max level from the current
/// display level.  Safe to call more than once.
pub fn init_logger() {
    // A logger may already be installed (e.g. by a test harness).
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level_filter_for(display_level()));
}
