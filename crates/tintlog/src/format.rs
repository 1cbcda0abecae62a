//! Line templates and the formatter installed on a sink before each write.
//!
//! A [`Template`] is parsed once from a source string such as
//! `"[{channel}] {message}"`. Supported placeholders:
//!
//! | Placeholder | Renders as                                   |
//! |-------------|----------------------------------------------|
//! | `{message}` | the message text, verbatim                   |
//! | `{channel}` | the sink's channel name                      |
//! | `{level}`   | the severity in upper case, e.g. `INFO`      |
//! | `{context}` | the context as compact JSON, empty when none |
//!
//! `{{` and `}}` produce literal braces. Every template must contain
//! `{message}`.
//!
//! A [`LineFormatter`] wraps a template in an optional SGR prefix and the
//! `ESC[0m` reset, then terminates the line:
//!
//! ```
//! use tintlog::format::{LineFormatter, Template};
//! use tintlog::sink::Record;
//! use tintlog::style::{PendingStyles, StyleKind, BOLD};
//!
//! let mut styles = PendingStyles::new();
//! styles.set(StyleKind::Bold, BOLD);
//! let formatter = LineFormatter::styled(Template::default(), &styles);
//!
//! let line = formatter.format(&Record::info("app", "ready"));
//! assert_eq!(line, "\x1b[1mready\x1b[0m\n");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TintError};
use crate::sink::Record;
use crate::style::PendingStyles;

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";
/// SGR reset, appended after every styled line.
pub const SGR_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Message,
    Channel,
    Level,
    Context,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "message" => Some(Self::Message),
            "channel" => Some(Self::Channel),
            "level" => Some(Self::Level),
            "context" => Some(Self::Context),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// A parsed line template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template source string.
    ///
    /// # Errors
    ///
    /// Returns [`TintError::Template`] for an unknown or unterminated
    /// placeholder, an unmatched `}`, or a template without `{message}`.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for n in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(TintError::template(source, "unterminated placeholder"));
                    }
                    let field = Placeholder::from_name(&name).ok_or_else(|| {
                        TintError::template(source, format!("unknown placeholder `{name}`"))
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TintError::template(source, "unmatched `}`")),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if !segments.contains(&Segment::Field(Placeholder::Message)) {
            return Err(TintError::template(source, "missing `{message}` placeholder"));
        }

        Ok(Self {
            source: source.to_owned(),
            segments,
        })
    }

    /// The source string this template was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    fn render_into(&self, out: &mut String, record: &Record<'_>) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Placeholder::Message) => out.push_str(record.message),
                Segment::Field(Placeholder::Channel) => out.push_str(record.channel),
                Segment::Field(Placeholder::Level) => out.push_str(record.severity.name()),
                Segment::Field(Placeholder::Context) => {
                    if record.context.is_empty() {
                        continue;
                    }
                    match serde_json::to_string(record.context) {
                        Ok(json) => out.push_str(&json),
                        Err(err) => tracing::warn!(
                            channel = record.channel,
                            error = %err,
                            "context serialization failed; rendered as empty"
                        ),
                    }
                }
            }
        }
    }
}

impl Default for Template {
    /// `{message}` on its own.
    fn default() -> Self {
        Self {
            source: "{message}".to_owned(),
            segments: vec![Segment::Field(Placeholder::Message)],
        }
    }
}

impl FromStr for Template {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Renders one record into one output line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineFormatter {
    /// Joined SGR parameters, `None` for an unstyled line.
    sgr: Option<String>,
    template: Template,
}

impl LineFormatter {
    /// Formatter producing `<template>\n` with no escape wrapping.
    #[must_use]
    pub fn plain(template: Template) -> Self {
        Self {
            sgr: None,
            template,
        }
    }

    /// Formatter producing `ESC[<params>m<template>ESC[0m\n`.
    ///
    /// Equivalent to [`LineFormatter::plain`] when `styles` is empty.
    #[must_use]
    pub fn styled(template: Template, styles: &PendingStyles) -> Self {
        Self {
            sgr: styles.sgr_params(),
            template,
        }
    }

    /// Joined SGR parameters, if this formatter styles its output.
    #[must_use]
    pub fn sgr_params(&self) -> Option<&str> {
        self.sgr.as_deref()
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Render `record` as a complete, newline-terminated line.
    #[must_use]
    pub fn format(&self, record: &Record<'_>) -> String {
        let mut out = String::with_capacity(record.message.len() + 16);
        match &self.sgr {
            Some(params) => {
                out.push_str(CSI);
                out.push_str(params);
                out.push('m');
                self.template.render_into(&mut out, record);
                out.push_str(SGR_RESET);
            }
            None => self.template.render_into(&mut out, record),
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Context, Severity};
    use crate::style::{StyleKind, UNDERLINE, text_colour_param};
    use serde_json::json;
    use tracing_test::traced_test;

    fn record<'a>(message: &'a str, context: &'a Context) -> Record<'a> {
        Record {
            channel: "app",
            severity: Severity::Info,
            message,
            context,
        }
    }

    #[test]
    fn default_template_is_message_only() {
        let empty = Context::new();
        let line = LineFormatter::default().format(&record("plain", &empty));
        assert_eq!(line, "plain\n");
    }

    #[test]
    fn styled_formatter_wraps_and_resets() {
        let mut styles = PendingStyles::new();
        styles.set(StyleKind::TextColour, text_colour_param(1));
        styles.set(StyleKind::Underline, UNDERLINE);
        let formatter = LineFormatter::styled(Template::default(), &styles);

        let empty = Context::new();
        assert_eq!(formatter.sgr_params(), Some("38;5;1;4"));
        assert_eq!(
            formatter.format(&record("m", &empty)),
            "\x1b[38;5;1;4mm\x1b[0m\n"
        );
    }

    #[test]
    fn styled_with_no_styles_matches_plain() {
        let empty = Context::new();
        let styled = LineFormatter::styled(Template::default(), &PendingStyles::new());
        assert_eq!(styled, LineFormatter::plain(Template::default()));
        assert_eq!(styled.format(&record("x", &empty)), "x\n");
    }

    #[test]
    fn default_template_ignores_context() {
        let context = json!({"user": 7}).as_object().cloned().unwrap_or_default();
        let line = LineFormatter::default().format(&record("hi", &context));
        assert_eq!(line, "hi\n");
    }

    #[test]
    fn all_placeholders_render() {
        let template = Template::parse("[{channel}.{level}] {message} {context}").unwrap();
        let context = json!({"id": 3}).as_object().cloned().unwrap_or_default();
        let line = LineFormatter::plain(template).format(&record("started", &context));
        assert_eq!(line, "[app.INFO] started {\"id\":3}\n");
    }

    #[test]
    #[traced_test]
    fn nested_context_renders_as_json_without_warning() {
        let template = Template::parse("{message} {context}").unwrap();
        let context = json!({"job": {"id": 9, "tags": ["a", "b"]}, "ok": true})
            .as_object()
            .cloned()
            .unwrap_or_default();
        let line = LineFormatter::plain(template).format(&record("ran", &context));
        assert_eq!(line, "ran {\"job\":{\"id\":9,\"tags\":[\"a\",\"b\"]},\"ok\":true}\n");
        assert!(!logs_contain("context serialization failed"));
    }

    #[test]
    fn empty_context_renders_as_nothing() {
        let template = Template::parse("{message}|{context}|").unwrap();
        let empty = Context::new();
        let line = LineFormatter::plain(template).format(&record("m", &empty));
        assert_eq!(line, "m||\n");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let template = Template::parse("{{{message}}}").unwrap();
        let empty = Context::new();
        let line = LineFormatter::plain(template).format(&record("x", &empty));
        assert_eq!(line, "{x}\n");
    }

    #[test]
    fn parse_rejects_bad_templates() {
        for (source, reason) in [
            ("{msg}", "unknown placeholder `msg`"),
            ("{message", "unterminated placeholder"),
            ("{message}}", "unmatched `}`"),
            ("{channel}", "missing `{message}` placeholder"),
            ("", "missing `{message}` placeholder"),
        ] {
            match Template::parse(source) {
                Err(TintError::Template { template, reason: got }) => {
                    assert_eq!(template, source);
                    assert_eq!(got, reason, "wrong reason for {source:?}");
                }
                other => panic!("expected template error for {source:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn template_round_trips_through_display() {
        let template: Template = "> {message}".parse().unwrap();
        assert_eq!(template.to_string(), "> {message}");
        assert_eq!(Template::default().source(), "{message}");
    }
}
