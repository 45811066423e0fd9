//! Configuration error types.

use std::path::PathBuf;

/// Broad classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    DecodeFailure,
}

/// Reasons the loader can fail. Both are terminal: no partial settings are returned.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The environment file could not be found, read, or parsed.
    #[error("Environment file {} is unavailable: {}", .path.display(), .source)]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// A present value could not be converted to its field's type.
    #[error("Failed to decode {key}: {reason}")]
    DecodeFailure { key: String, reason: String },
}

impl ConfigError {
    pub(crate) fn decode(key: impl Into<String>, reason: impl ToString) -> Self {
        ConfigError::DecodeFailure {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            ConfigError::DecodeFailure { .. } => ErrorKind::DecodeFailure,
        }
    }

    /// Environment key the failure refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::SourceUnavailable { .. } => None,
            ConfigError::DecodeFailure { key, .. } => Some(key),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        let key = match &err {
            config::ConfigError::Type { key: Some(key), .. } => key.clone(),
            _ => "settings".to_string(),
        };
        ConfigError::decode(key, err)
    }
}
