//! Command-line argument parsing for the `lzdecode` binary.
//!
//! [`parse_args`] reads `std::env::args()`; [`parse_args_from`] takes an
//! explicit argument list and is what the unit tests drive.  Both return a
//! [`ParsedArgs`] with the option values resolved against the environment
//! defaults from [`crate::config`].

use anyhow::{anyhow, bail, Context};
use clap::Parser;

use crate::cli::constants::{set_display_level, DISPLAY_LEVEL_DEFAULT, DISPLAY_LEVEL_MAX};
use crate::config::{parse_size, MAX_CHUNK_SIZE_LIMIT};
use crate::io::file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::io::prefs::{InputLayout, Prefs};
use crate::Codec;

/// Raw clap view of the command line.
#[derive(Debug, Parser)]
#[command(
    name = "lzdecode",
    version,
    about = "Decode LZ4 and LZO1X block streams and raw blocks"
)]
struct Cli {
    /// Input files ("stdin" or none reads standard input)
    #[arg(value_name = "INPUT")]
    inputs: Vec<String>,

    /// Codec of the input (default: from the file extension)
    #[arg(short = 'F', long = "format", value_enum)]
    format: Option<Codec>,

    /// Input is a single raw block instead of a block stream
    #[arg(long, requires = "size")]
    raw: bool,

    /// Uncompressed size of a raw block (K and M suffixes accepted)
    #[arg(short = 's', long, value_name = "BYTES")]
    size: Option<String>,

    /// Largest uncompressed chunk accepted from a block stream
    #[arg(short = 'B', long = "max-chunk", value_name = "BYTES")]
    max_chunk: Option<String>,

    /// Output file (single input only)
    #[arg(short = 'o', long, value_name = "FILE", conflicts_with_all = ["stdout", "test"])]
    output: Option<String>,

    /// Write to standard output
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Decode and discard the output
    #[arg(short = 't', long)]
    test: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long)]
    force: bool,

    /// Remove source files after successful decoding
    #[arg(long = "rm")]
    remove: bool,

    /// Worker threads when decoding several files (0 = one per CPU)
    #[arg(short = 'T', long = "threads", value_name = "N")]
    threads: Option<usize>,

    /// More verbose output (repeatable)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Less output (repeatable)
    #[arg(short = 'q', long, action = clap::ArgAction::Count)]
    quiet: u8,
}

/// Where decoded bytes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Next to each source, with the codec extension removed.
    BesideSource,
    /// Standard output, the null device, or an explicit file.
    Path(String),
}

/// Options and filenames resolved from the command line.
#[derive(Debug)]
pub struct ParsedArgs {
    pub prefs: Prefs,
    /// Input paths; `["stdin"]` when none were given.
    pub inputs: Vec<String>,
    pub destination: Destination,
    /// Display level after applying `-v` / `-q`.
    pub display_level: u32,
}

/// Parses the process arguments.
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    parse_args_from(std::env::args())
}

/// Parses an explicit argument list; the first item is the program name.
pub fn parse_args_from<I, T>(args: I) -> anyhow::Result<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;

    let level = (DISPLAY_LEVEL_DEFAULT + cli.verbose as u32)
        .saturating_sub(cli.quiet as u32)
        .min(DISPLAY_LEVEL_MAX);
    set_display_level(level);

    let mut prefs = Prefs::from_env();
    prefs.codec = cli.format;
    prefs.overwrite = cli.force;
    prefs.test_mode = cli.test;
    prefs.remove_src_file = cli.remove;
    if let Some(n) = cli.threads {
        prefs.nb_workers = n;
    }

    if let Some(s) = &cli.max_chunk {
        let n = parse_size(s).ok_or_else(|| anyhow!("bad usage: invalid --max-chunk value '{}'", s))?;
        if n == 0 || n > MAX_CHUNK_SIZE_LIMIT {
            bail!("bad usage: --max-chunk must be between 1 and {} bytes", MAX_CHUNK_SIZE_LIMIT);
        }
        prefs.max_chunk_size = n;
    }

    if cli.raw {
        let s = cli.size.as_deref().unwrap_or_default();
        let size = parse_size(s)
            .filter(|&n| n <= MAX_CHUNK_SIZE_LIMIT)
            .with_context(|| format!("bad usage: invalid --size value '{}'", s))?;
        prefs.layout = InputLayout::RawBlock { size };
    } else if cli.size.is_some() {
        bail!("bad usage: --size only applies to --raw input");
    }

    let inputs = if cli.inputs.is_empty() {
        vec![STDIN_MARK.to_owned()]
    } else {
        cli.inputs
    };
    let reads_stdin = inputs.iter().any(|s| s == STDIN_MARK);
    if reads_stdin && prefs.codec.is_none() {
        bail!("bad usage: --format is required when reading standard input");
    }

    let destination = if cli.test {
        Destination::Path(NUL_MARK.to_owned())
    } else if cli.stdout {
        Destination::Path(STDOUT_MARK.to_owned())
    } else if let Some(out) = cli.output {
        if inputs.len() > 1 {
            bail!("bad usage: --output requires a single input");
        }
        Destination::Path(out)
    } else if reads_stdin {
        Destination::Path(STDOUT_MARK.to_owned())
    } else {
        Destination::BesideSource
    };

    Ok(ParsedArgs {
        prefs,
        inputs,
        destination,
        display_level: level,
    })
}
