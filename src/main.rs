//! Binary entry point for the `lzdecode` command-line tool.
//!
//! # Control flow
//!
//! 1. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 2. [`run`] dispatches to the file-level decoders.
//! 3. Any error is reported on stderr and the process exits with status 1.

use lzdecode::cli::args::{parse_args, Destination, ParsedArgs};
use lzdecode::cli::constants::{init_logger, AUTHOR, PROGRAM_NAME};
use lzdecode::io::{decompress_filename, decompress_multiple_filenames};

/// Execute the decoding selected by argument parsing.
fn run(args: ParsedArgs) -> anyhow::Result<()> {
    let ParsedArgs {
        prefs,
        inputs,
        destination,
        display_level: _,
    } = args;

    lzdecode::displaylevel!(
        3,
        "*** {} v{} {}-bit, by {} ***\n",
        PROGRAM_NAME,
        lzdecode::VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8,
        AUTHOR
    );
    lzdecode::displaylevel!(4, "{:?}\n", prefs);

    match (&destination, inputs.as_slice()) {
        (Destination::Path(dst), [src]) => {
            decompress_filename(src, dst, &prefs)?;
        }
        (Destination::Path(dst), _) => {
            let srcs: Vec<&str> = inputs.iter().map(String::as_str).collect();
            decompress_multiple_filenames(&srcs, Some(dst), &prefs)?;
        }
        (Destination::BesideSource, _) => {
            let srcs: Vec<&str> = inputs.iter().map(String::as_str).collect();
            decompress_multiple_filenames(&srcs, None, &prefs)?;
        }
    }
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            // clap renders --help / --version itself.
            if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
                clap_err.exit();
            }
            lzdecode::display!("{}: {}\n", PROGRAM_NAME, e);
            std::process::exit(1);
        }
    };
    init_logger();

    let code = match run(args) {
        Ok(()) => 0,
        Err(e) => {
            lzdecode::displaylevel!(1, "{}: {:#}\n", PROGRAM_NAME, e);
            1
        }
    };
    std::process::exit(code);
}
