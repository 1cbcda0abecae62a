//! Process-wide logger and lock-scoped call chains.
//!
//! [`shared`] lazily creates one [`StyleLogger`] on standard output and keeps
//! it for the life of the process. The free functions in this module open a
//! [`StyleChain`] on it: the chain owns the lock from its first setter until
//! it is dropped, so the accumulate, emit, reset sequence of one caller can
//! never pick up another caller's styles.
//!
//! ```no_run
//! # fn main() -> tintlog::Result<()> {
//! tintlog::text_colour("green").bold().log("deployed")?;
//! tintlog::log("plain again")?;
//! # Ok(())
//! # }
//! ```
//!
//! A chain blocks other chains until dropped. Holding one while starting
//! another on the same thread deadlocks. Styles still pending when a chain is
//! dropped are discarded, so the next chain always starts idle.

use std::io::{Stdout, Write};
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::error::Result;
use crate::logger::StyleLogger;
use crate::sink::Context;

static SHARED: OnceLock<Mutex<StyleLogger<Stdout>>> = OnceLock::new();

/// The process-wide logger, created on first use.
pub fn shared() -> &'static Mutex<StyleLogger<Stdout>> {
    SHARED.get_or_init(|| {
        tracing::debug!("creating shared style logger");
        Mutex::new(StyleLogger::new())
    })
}

/// Exclusive access to a logger for the duration of one call chain.
pub struct StyleChain<'a, W: Write = Stdout> {
    guard: MutexGuard<'a, StyleLogger<W>>,
}

impl<'a, W: Write> StyleChain<'a, W> {
    /// Lock `logger` for a new chain.
    ///
    /// A lock poisoned by a panicking chain is recovered and its pending
    /// styles are discarded.
    pub fn lock(logger: &'a Mutex<StyleLogger<W>>) -> Self {
        let guard = match logger.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("recovering poisoned style logger; pending styles discarded");
                let mut guard = poisoned.into_inner();
                guard.reset();
                logger.clear_poison();
                guard
            }
        };
        Self { guard }
    }

    #[must_use]
    pub fn text_colour(mut self, name: &str) -> Self {
        self.guard.text_colour(name);
        self
    }

    #[must_use]
    pub fn background_colour(mut self, name: &str) -> Self {
        self.guard.background_colour(name);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.guard.bold();
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.guard.italic();
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.guard.underline();
        self
    }

    pub fn log(mut self, message: &str) -> Result<Self> {
        self.guard.log(message)?;
        Ok(self)
    }

    pub fn log_with(mut self, message: &str, context: &Context) -> Result<Self> {
        self.guard.log_with(message, context)?;
        Ok(self)
    }
}

impl<W: Write> Drop for StyleChain<'_, W> {
    /// Styles set but never logged die with the chain.
    fn drop(&mut self) {
        if !self.guard.pending().is_empty() {
            tracing::trace!(
                discarded = self.guard.pending().len(),
                "chain released with unlogged styles; discarded"
            );
            self.guard.reset();
        }
    }
}

impl<W: Write> Deref for StyleChain<'_, W> {
    type Target = StyleLogger<W>;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<W: Write> DerefMut for StyleChain<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

/// Start a chain on the shared logger.
pub fn chain() -> StyleChain<'static> {
    StyleChain::lock(shared())
}

/// Start a chain on the shared logger with a text colour.
pub fn text_colour(name: &str) -> StyleChain<'static> {
    chain().text_colour(name)
}

/// Start a chain on the shared logger with a background colour.
pub fn background_colour(name: &str) -> StyleChain<'static> {
    chain().background_colour(name)
}

pub fn bold() -> StyleChain<'static> {
    chain().bold()
}

pub fn italic() -> StyleChain<'static> {
    chain().italic()
}

pub fn underline() -> StyleChain<'static> {
    chain().underline()
}

/// Write an unstyled line through the shared logger.
pub fn log(message: &str) -> Result<StyleChain<'static>> {
    chain().log(message)
}

pub fn log_with(message: &str, context: &Context) -> Result<StyleChain<'static>> {
    chain().log_with(message, context)
}
