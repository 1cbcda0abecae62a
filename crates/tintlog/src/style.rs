//! Pending style state accumulated by a call chain.
//!
//! [`PendingStyles`] holds at most one SGR parameter string per
//! [`StyleKind`]. Setting a kind that is already present replaces its value
//! in place, so the kind keeps the position where it was first set during the
//! current chain. Rendering joins the values with `;`.

use std::fmt;

/// SGR parameter for bold text.
pub const BOLD: &str = "1";
/// SGR parameter for italic text.
pub const ITALIC: &str = "3";
/// SGR parameter for underlined text.
pub const UNDERLINE: &str = "4";

/// A category of pending style state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// Foreground colour (`38;5;<n>`).
    TextColour,
    /// Background colour (`48;5;<n>`).
    BackgroundColour,
    Bold,
    Italic,
    Underline,
}

impl StyleKind {
    /// Stable lowercase name, used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextColour => "text_colour",
            Self::BackgroundColour => "background_colour",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SGR parameter selecting palette entry `code` as the foreground.
#[must_use]
pub fn text_colour_param(code: u8) -> String {
    format!("38;5;{code}")
}

/// SGR parameter selecting palette entry `code` as the background.
#[must_use]
pub fn background_colour_param(code: u8) -> String {
    format!("48;5;{code}")
}

/// Whether a logger has styles waiting for the next emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    /// No pending styles. Initial state, and the state after every emission.
    Idle,
    /// One or more pending styles.
    Styled,
}

/// Ordered, kind-unique map of pending SGR parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingStyles {
    entries: Vec<(StyleKind, String)>,
}

impl PendingStyles {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the parameter for `kind`, replacing any earlier value in place.
    pub fn set(&mut self, kind: StyleKind, param: impl Into<String>) {
        let param = param.into();
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = param,
            None => self.entries.push((kind, param)),
        }
    }

    /// Current parameter for `kind`, if set.
    #[must_use]
    pub fn get(&self, kind: StyleKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, param)| param.as_str())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(kind, parameter)` pairs in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleKind, &str)> {
        self.entries.iter().map(|(kind, param)| (*kind, param.as_str()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The parameters joined with `;`, or `None` when nothing is pending.
    #[must_use]
    pub fn sgr_params(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let params: Vec<&str> = self.entries.iter().map(|(_, p)| p.as_str()).collect();
        Some(params.join(";"))
    }

    /// [`LoggerState`] implied by this set.
    #[inline]
    #[must_use]
    pub fn state(&self) -> LoggerState {
        if self.is_empty() {
            LoggerState::Idle
        } else {
            LoggerState::Styled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_renders_nothing() {
        let styles = PendingStyles::new();
        assert!(styles.is_empty());
        assert_eq!(styles.sgr_params(), None);
        assert_eq!(styles.state(), LoggerState::Idle);
    }

    #[test]
    fn params_join_in_insertion_order() {
        let mut styles = PendingStyles::new();
        styles.set(StyleKind::Bold, BOLD);
        styles.set(StyleKind::Italic, ITALIC);
        styles.set(StyleKind::TextColour, text_colour_param(1));
        assert_eq!(styles.sgr_params().as_deref(), Some("1;3;38;5;1"));
        assert_eq!(styles.state(), LoggerState::Styled);
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let mut styles = PendingStyles::new();
        styles.set(StyleKind::TextColour, text_colour_param(1));
        styles.set(StyleKind::Underline, UNDERLINE);
        styles.set(StyleKind::TextColour, text_colour_param(4));

        assert_eq!(styles.len(), 2);
        assert_eq!(styles.get(StyleKind::TextColour), Some("38;5;4"));
        assert_eq!(styles.sgr_params().as_deref(), Some("38;5;4;4"));
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut styles = PendingStyles::new();
        styles.set(StyleKind::Underline, UNDERLINE);
        styles.clear();
        assert_eq!(styles.state(), LoggerState::Idle);
        assert_eq!(styles.get(StyleKind::Underline), None);
    }

    #[test]
    fn colour_params_use_256_colour_form() {
        assert_eq!(text_colour_param(202), "38;5;202");
        assert_eq!(background_colour_param(238), "48;5;238");
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(StyleKind::BackgroundColour.to_string(), "background_colour");
        assert_eq!(StyleKind::Bold.as_str(), "bold");
    }
}
