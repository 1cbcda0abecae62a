//! Logger configuration.
//!
//! [`LoggerConfig`] can be built in code or loaded from TOML. Every field has
//! a default, so an empty document is valid:
//!
//! ```toml
//! # tintlog.toml
//! channel = "worker"
//! level = "info"
//! template = "[{channel}] {message}"
//! ```
//!
//! ```rust,ignore
//! let config = LoggerConfig::from_toml_file("tintlog.toml")?;
//! let logger = StyleLogger::from_config(&config, std::io::stdout())?;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TintError};
use crate::format::Template;
use crate::sink::Severity;

/// Default channel name.
pub const DEFAULT_CHANNEL: &str = "app";

/// Settings for a [`StyleLogger`](crate::StyleLogger) and its sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Channel name, available to templates as `{channel}`.
    pub channel: String,

    /// Minimum severity written by the sink.
    pub level: Severity,

    /// Line template; `{message}` is required.
    pub template: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_owned(),
            level: Severity::Debug,
            template: "{message}".to_owned(),
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TintError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check the template and return it parsed.
    pub fn validate(&self) -> Result<Template> {
        Template::parse(&self.template)
    }
}
