use thiserror::Error;
use tintlog::TintError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tint(#[from] TintError),

    #[error("invalid --context JSON: {0}")]
    ContextJson(#[from] serde_json::Error),

    #[error("--context must be a JSON object, got {kind}")]
    ContextNotObject { kind: &'static str },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Tint(TintError::Io(_)) => 74,
            Self::Tint(_) => 78,
            Self::ContextJson(_) | Self::ContextNotObject { .. } => 64,
        }
    }
}
