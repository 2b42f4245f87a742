use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No configuration sources were registered")]
    NoSourcesRegistered,

    #[error("None of the {registered} registered configuration sources is enabled")]
    NoSourcesEnabled { registered: usize },

    #[error("Malformed configuration document '{}': {}", .path.display(), .reason)]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("Configuration source '{source_name}' failed: {message}")]
    Source { source_name: String, message: String },

    #[error("Invalid configuration override '{0}', expected KEY=VALUE")]
    InvalidOverride(String),

    #[error("Configuration build timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Whether the error means the build was asked to do something impossible
    /// (no effective sources) rather than a source failing.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            ConfigError::NoSourcesRegistered | ConfigError::NoSourcesEnabled { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
