//! Line-oriented output sink.
//!
//! [`LineSink`] owns the writer (standard output by default), the channel
//! name, a minimum [`Severity`], and the [`LineFormatter`] used for the next
//! write. The formatter is replaced before every emission by the logger; the
//! writer is fixed for the life of the sink.

use std::fmt;
use std::io::{self, Stdout, Write};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::format::LineFormatter;

/// Structured metadata attached to a record.
///
/// Forwarded to diagnostics as a field and rendered only by templates that
/// contain `{context}`.
pub type Context = serde_json::Map<String, serde_json::Value>;

static EMPTY_CONTEXT: LazyLock<Context> = LazyLock::new(Context::new);

/// Record severity, lowest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Self; 8] = [
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::Alert,
        Self::Emergency,
    ];

    /// Upper-case name as rendered by `{level}`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Notice => "NOTICE",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
            Self::Alert => "ALERT",
            Self::Emergency => "EMERGENCY",
        }
    }

    /// Parse a case-insensitive severity name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => Self::DEBUG,
            Severity::Info | Severity::Notice => Self::INFO,
            Severity::Warning => Self::WARN,
            Severity::Error | Severity::Critical | Severity::Alert | Severity::Emergency => {
                Self::ERROR
            }
        }
    }
}

/// One message on its way to the sink.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub channel: &'a str,
    pub severity: Severity,
    pub message: &'a str,
    pub context: &'a Context,
}

impl<'a> Record<'a> {
    /// An informational record with empty context.
    #[must_use]
    pub fn info(channel: &'a str, message: &'a str) -> Self {
        Self {
            channel,
            severity: Severity::Info,
            message,
            context: &EMPTY_CONTEXT,
        }
    }
}

/// Writer plus the formatter for the next line.
pub struct LineSink<W: Write = Stdout> {
    writer: W,
    formatter: LineFormatter,
    channel: String,
    min_severity: Severity,
}

impl LineSink<Stdout> {
    /// Sink on standard output at [`Severity::Debug`].
    #[must_use]
    pub fn stdout(channel: impl Into<String>) -> Self {
        Self::new(io::stdout(), channel, Severity::Debug)
    }
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W, channel: impl Into<String>, min_severity: Severity) -> Self {
        Self {
            writer,
            formatter: LineFormatter::default(),
            channel: channel.into(),
            min_severity,
        }
    }

    /// Install the format used by subsequent writes.
    pub fn set_formatter(&mut self, formatter: LineFormatter) {
        self.formatter = formatter;
    }

    #[inline]
    #[must_use]
    pub fn formatter(&self) -> &LineFormatter {
        &self.formatter
    }

    #[inline]
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    #[inline]
    #[must_use]
    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    /// Whether a record at `severity` would be written.
    #[inline]
    #[must_use]
    pub fn accepts(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }

    /// Format and write one record, then flush.
    ///
    /// Returns `Ok(false)` without touching the writer when the record is
    /// below the minimum severity.
    pub fn handle(&mut self, record: &Record<'_>) -> io::Result<bool> {
        if !self.accepts(record.severity) {
            return Ok(false);
        }
        write_record(&mut self.writer, &self.formatter, record)
    }

    /// Write `message` under this sink's own channel.
    pub fn emit(
        &mut self,
        severity: Severity,
        message: &str,
        context: &Context,
    ) -> io::Result<bool> {
        if !self.accepts(severity) {
            return Ok(false);
        }
        let record = Record {
            channel: &self.channel,
            severity,
            message,
            context,
        };
        write_record(&mut self.writer, &self.formatter, &record)
    }

    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn write_record<W: Write>(
    writer: &mut W,
    formatter: &LineFormatter,
    record: &Record<'_>,
) -> io::Result<bool> {
    let line = formatter.format(record);
    writer.write_all(line.as_bytes())?;
    writer.flush()?;
    Ok(true)
}

impl<W: Write> fmt::Debug for LineSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSink")
            .field("channel", &self.channel)
            .field("min_severity", &self.min_severity)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}
