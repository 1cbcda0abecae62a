#![forbid(unsafe_code)]

//! Fluent ANSI styling for single-line console logging.
//!
//! # Overview
//! `tintlog` composes a text colour, a background colour, and decorations
//! (bold, italic, underline) through chained calls, then writes one line
//! wrapped in the matching SGR escape sequence. Pending styles are cleared
//! after every line, so each chain starts from a plain slate.
//!
//! ```
//! use tintlog::StyleLogger;
//!
//! let mut logger = StyleLogger::with_writer(Vec::new());
//! logger.bold().italic().log("x").unwrap();
//! logger.log("plain").unwrap();
//!
//! assert_eq!(logger.sink().writer().as_slice(), b"\x1b[1;3mx\x1b[0m\nplain\n");
//! ```
//!
//! # This crate provides
//! - [`StyleLogger`], an explicit logger value for callers that own their output.
//! - [`global`], a lazily created process-wide logger on standard output, with
//!   lock-scoped [`StyleChain`]s and free-function entry points.
//! - [`palette`], the fixed name to 256-colour index table.
//! - [`format::Template`] and [`format::LineFormatter`] for line layout.
//! - [`LoggerConfig`], loadable from TOML.
//!
//! Unknown colour names are ignored rather than reported; a typo never aborts
//! a chain. Internal diagnostics are emitted through `tracing`.

/// Logger configuration and TOML loading.
pub mod config;
/// Error type shared by the crate.
pub mod error;
/// Line templates and formatters.
pub mod format;
/// Process-wide logger and call chains.
pub mod global;
/// The chainable style logger.
pub mod logger;
/// Named 256-colour palette.
pub mod palette;
/// Line sink, severities, and records.
pub mod sink;
/// Pending style state.
pub mod style;

pub use config::LoggerConfig;
pub use error::{Result, TintError};
pub use global::{
    StyleChain, background_colour, bold, chain, italic, log, log_with, shared, text_colour,
    underline,
};
pub use logger::StyleLogger;
pub use sink::{Context, LineSink, Severity};
pub use style::{LoggerState, PendingStyles, StyleKind};
