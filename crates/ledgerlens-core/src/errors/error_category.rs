use serde::{Deserialize, Serialize};

/// Coarse classification callers map to a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    /// Bad input from the caller. Never retried.
    InvalidArgument,
    /// Internal data-integrity failure: the operation is aborted, no partial result.
    ConsistencyViolation,
    /// Filesystem or reader failure.
    Io,
    /// Malformed file content (CSV, TOML).
    Parse,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::ConsistencyViolation => "consistency_violation",
            Self::Io => "io",
            Self::Parse => "parse",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every subsystem error.
pub trait Categorized {
    fn category(&self) -> ErrorCategory;
}
