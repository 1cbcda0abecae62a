use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TintError>;

#[derive(Debug, Error)]
pub enum TintError {
    /// The sink could not be written. Pending styles are already cleared.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid line template {template:?}: {reason}")]
    Template { template: String, reason: String },

    #[error("invalid logger config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read logger config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TintError {
    #[must_use]
    pub fn template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Template {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the output sink.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
