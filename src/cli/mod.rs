//! Command-line interface for the `lzdecode` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity, the shared `DISPLAY_LEVEL` atomic, display macros, and the `log` bridge. |
//! | [`args`]      | `ParsedArgs`: clap-based parsing resolved against the environment defaults. |
//!
//! Typical call sequence: [`args::parse_args`] → [`constants::init_logger`] →
//! dispatch to [`crate::io`].

pub mod args;
pub mod constants;
