use super::error_category::{Categorized, ErrorCategory};
use super::{ClusteringError, ConfigError, DatasetError, FrequencyError};

/// Top-level error aggregating every subsystem error via `From` conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerlensError {
    #[error("clustering error: {0}")]
    Clustering(#[from] ClusteringError),

    #[error("frequency error: {0}")]
    Frequency(#[from] FrequencyError),

    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LedgerlensError {
    pub fn is_invalid_argument(&self) -> bool {
        self.category() == ErrorCategory::InvalidArgument
    }

    pub fn is_consistency_violation(&self) -> bool {
        self.category() == ErrorCategory::ConsistencyViolation
    }
}

impl Categorized for LedgerlensError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Clustering(e) => e.category(),
            Self::Frequency(e) => e.category(),
            Self::Dataset(e) => e.category(),
            Self::Config(e) => e.category(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type LedgerlensResult<T> = Result<T, LedgerlensError>;
