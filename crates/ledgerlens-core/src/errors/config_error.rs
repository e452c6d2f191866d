use super::error_category::{Categorized, ErrorCategory};

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl Categorized for ConfigError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } => ErrorCategory::Io,
            Self::ParseError { .. } => ErrorCategory::Parse,
            Self::ValidationFailed { .. } => ErrorCategory::InvalidArgument,
        }
    }
}
