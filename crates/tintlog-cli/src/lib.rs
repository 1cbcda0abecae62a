#![forbid(unsafe_code)]

//! Command-line front end for `tintlog`.
//!
//! `tintlog say` runs one style chain and writes the line to stdout;
//! `tintlog palette` shows every named colour in itself.

pub mod cli;
pub mod error;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{CliError, Result};
