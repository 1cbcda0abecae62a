//! Fluent style accumulator and emitter.
//!
//! A [`StyleLogger`] collects style attributes through chained setters and
//! writes one line per emission. Every emission takes the pending styles out
//! of the logger before anything is written, so the logger is back in
//! [`LoggerState::Idle`] on every exit path, including a failed write.
//!
//! ```
//! use tintlog::StyleLogger;
//!
//! let mut logger = StyleLogger::with_writer(Vec::new());
//! logger.text_colour("orange").background_colour("charcoal").underline();
//! logger.log("warn").unwrap();
//!
//! assert_eq!(
//!     logger.sink().writer().as_slice(),
//!     b"\x1b[38;5;202;48;5;238;4mwarn\x1b[0m\n",
//! );
//! ```

use std::fmt;
use std::io::{self, Stdout, Write};

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::format::{LineFormatter, Template};
use crate::palette;
use crate::sink::{Context, LineSink, Severity};
use crate::style::{
    BOLD, ITALIC, LoggerState, PendingStyles, StyleKind, UNDERLINE, background_colour_param,
    text_colour_param,
};

/// Chainable ANSI style accumulator in front of a [`LineSink`].
pub struct StyleLogger<W: Write = Stdout> {
    pending: PendingStyles,
    template: Template,
    sink: LineSink<W>,
}

impl StyleLogger<Stdout> {
    /// Logger on standard output with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for StyleLogger<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StyleLogger<W> {
    /// Logger on `writer` with the default configuration.
    pub fn with_writer(writer: W) -> Self {
        let config = LoggerConfig::default();
        Self {
            pending: PendingStyles::new(),
            template: Template::default(),
            sink: LineSink::new(writer, config.channel, config.level),
        }
    }

    /// Logger on `writer` configured by `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configured template does not parse.
    pub fn from_config(config: &LoggerConfig, writer: W) -> Result<Self> {
        let template = config.validate()?;
        Ok(Self {
            pending: PendingStyles::new(),
            template,
            sink: LineSink::new(writer, config.channel.clone(), config.level),
        })
    }

    /// Set the text colour by palette name. Unknown names are ignored.
    pub fn text_colour(&mut self, name: &str) -> &mut Self {
        self.set_colour(StyleKind::TextColour, name, text_colour_param)
    }

    /// Set the background colour by palette name. Unknown names are ignored.
    pub fn background_colour(&mut self, name: &str) -> &mut Self {
        self.set_colour(StyleKind::BackgroundColour, name, background_colour_param)
    }

    pub fn bold(&mut self) -> &mut Self {
        self.pending.set(StyleKind::Bold, BOLD);
        self
    }

    pub fn italic(&mut self) -> &mut Self {
        self.pending.set(StyleKind::Italic, ITALIC);
        self
    }

    pub fn underline(&mut self) -> &mut Self {
        self.pending.set(StyleKind::Underline, UNDERLINE);
        self
    }

    fn set_colour(&mut self, kind: StyleKind, name: &str, param: fn(u8) -> String) -> &mut Self {
        match palette::lookup(name) {
            Some(code) => self.pending.set(kind, param(code)),
            None => tracing::trace!(colour = name, kind = %kind, "unknown colour name ignored"),
        }
        self
    }

    /// Write `message` at [`Severity::Info`] with no context.
    ///
    /// # Errors
    ///
    /// Returns [`TintError::Io`](crate::TintError::Io) if the sink cannot be
    /// written. Pending styles are cleared either way.
    pub fn log(&mut self, message: &str) -> Result<&mut Self> {
        self.log_at(Severity::Info, message, &Context::new())
    }

    /// Write `message` at [`Severity::Info`] with structured context.
    pub fn log_with(&mut self, message: &str, context: &Context) -> Result<&mut Self> {
        self.log_at(Severity::Info, message, context)
    }

    /// Write `message` at an explicit severity.
    ///
    /// The pending styles are rendered into the sink's formatter, the line is
    /// written, and the logger returns to [`LoggerState::Idle`] whether or not
    /// the write succeeded. Records below the sink's minimum severity are
    /// dropped but still consume the pending styles.
    pub fn log_at(
        &mut self,
        severity: Severity,
        message: &str,
        context: &Context,
    ) -> Result<&mut Self> {
        let styles = std::mem::take(&mut self.pending);
        self.sink
            .set_formatter(LineFormatter::styled(self.template.clone(), &styles));

        let sgr = styles.sgr_params().unwrap_or_default();
        tracing::debug!(
            channel = self.sink.channel(),
            severity = %severity,
            sgr = %sgr,
            context = %ContextJson(context),
            "emitting line"
        );

        match self.sink.emit(severity, message, context) {
            Ok(true) => Ok(self),
            Ok(false) => {
                tracing::trace!(
                    severity = %severity,
                    min_severity = %self.sink.min_severity(),
                    "line below minimum severity dropped"
                );
                Ok(self)
            }
            Err(err) => {
                tracing::warn!(
                    channel = self.sink.channel(),
                    error = %err,
                    "sink write failed"
                );
                Err(err.into())
            }
        }
    }

    /// Discard pending styles without writing anything.
    pub fn reset(&mut self) -> &mut Self {
        self.pending.clear();
        self
    }

    #[inline]
    #[must_use]
    pub fn pending(&self) -> &PendingStyles {
        &self.pending
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> LoggerState {
        self.pending.state()
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    #[must_use]
    pub fn sink(&self) -> &LineSink<W> {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut LineSink<W> {
        &mut self.sink
    }

    pub fn into_sink(self) -> LineSink<W> {
        self.sink
    }
}

/// Renders a context as compact JSON for diagnostic fields.
struct ContextJson<'a>(&'a Context);

impl fmt::Display for ContextJson<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<W: Write> fmt::Debug for StyleLogger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleLogger")
            .field("pending", &self.pending)
            .field("template", &self.template)
            .field("sink", &self.sink)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn output(logger: &StyleLogger<Vec<u8>>) -> &str {
        std::str::from_utf8(logger.sink().writer()).unwrap()
    }

    #[test]
    fn setters_move_idle_to_styled() {
        let mut logger = StyleLogger::with_writer(Vec::new());
        assert_eq!(logger.state(), LoggerState::Idle);
        logger.bold();
        assert_eq!(logger.state(), LoggerState::Styled);
        logger.italic();
        assert_eq!(logger.state(), LoggerState::Styled);
    }

    #[test]
    fn log_returns_to_idle() {
        let mut logger = StyleLogger::with_writer(Vec::new());
        logger.text_colour("red").underline().log("x").unwrap();
        assert_eq!(logger.state(), LoggerState::Idle);
        assert!(logger.pending().is_empty());
    }

    #[test]
    fn unknown_colour_leaves_pending_untouched() {
        let mut logger = StyleLogger::with_writer(Vec::new());
        logger.bold().text_colour("not_a_colour").background_colour("Red");
        assert_eq!(logger.pending().len(), 1);
        assert_eq!(logger.pending().get(StyleKind::Bold), Some("1"));
    }

    #[test]
    fn chained_logs_share_one_sink() {
        let mut logger = StyleLogger::with_writer(Vec::new());
        logger
            .bold()
            .log("a")
            .unwrap()
            .log("b")
            .unwrap()
            .italic()
            .log("c")
            .unwrap();
        assert_eq!(output(&logger), "\x1b[1ma\x1b[0m\nb\n\x1b[3mc\x1b[0m\n");
    }

    #[test]
    fn context_is_not_interpolated_by_default() {
        let mut logger = StyleLogger::with_writer(Vec::new());
        let context = json!({"job": "sync"}).as_object().cloned().unwrap_or_default();
        logger.log_with("done", &context).unwrap();
        assert_eq!(output(&logger), "done\n");
    }

    #[test]
    fn configured_template_is_styled_as_a_whole() {
        let config = LoggerConfig::default()
            .with_channel("jobs")
            .with_template("[{channel}] {message} {context}");
        let mut logger = StyleLogger::from_config(&config, Vec::new()).unwrap();
        let context = json!({"n": 2}).as_object().cloned().unwrap_or_default();
        logger.bold().log_with("ran", &context).unwrap();
        assert_eq!(output(&logger), "\x1b[1m[jobs] ran {\"n\":2}\x1b[0m\n");
    }

    #[test]
    fn filtered_severity_still_resets_styles() {
        let config = LoggerConfig::default().with_level(Severity::Warning);
        let mut logger = StyleLogger::from_config(&config, Vec::new()).unwrap();
        logger.text_colour("red").log("hidden").unwrap();
        assert_eq!(logger.state(), LoggerState::Idle);
        logger
            .log_at(Severity::Error, "shown", &Context::new())
            .unwrap();
        assert_eq!(output(&logger), "shown\n");
    }

    #[test]
    fn invalid_config_template_fails_construction() {
        let config = LoggerConfig::default().with_template("{oops}");
        assert!(StyleLogger::from_config(&config, Vec::new()).is_err());
    }

    #[test]
    fn reset_discards_without_writing() {
        let mut logger = StyleLogger::with_writer(Vec::new());
        logger.underline().reset();
        assert_eq!(logger.state(), LoggerState::Idle);
        assert!(logger.sink().writer().is_empty());
    }

    #[test]
    #[traced_test]
    fn unknown_colour_is_traced() {
        let mut logger = StyleLogger::with_writer(Vec::new());
        logger.text_colour("chartreuse");
        assert!(logs_contain("unknown colour name ignored"));
        assert!(logs_contain("chartreuse"));
    }

    #[test]
    #[traced_test]
    fn emission_carries_context_as_diagnostic_field() {
        let mut logger = StyleLogger::with_writer(Vec::new());
        let context = json!({"request": 41}).as_object().cloned().unwrap_or_default();
        logger.bold().log_with("served", &context).unwrap();
        assert!(logs_contain("emitting line"));
        assert!(logs_contain("request"));
        assert!(logs_contain("sgr=1"));
    }
}
