use super::error_category::{Categorized, ErrorCategory};

/// String-clustering subsystem errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClusteringError {
    #[error("data list is empty: at least one string is required")]
    EmptyDataList,

    #[error("invalid distance metric: {value}, must be one of {expected}")]
    UnknownDistanceMetric { value: String, expected: String },

    #[error("invalid linkage method: {value}, must be one of {expected}")]
    UnknownLinkageMethod { value: String, expected: String },

    #[error(
        "invalid target number of cluster: {requested}, it should be between 1 and {unique} (the number of unique preprocessed strings)"
    )]
    ClusterCountOutOfRange { requested: usize, unique: usize },

    #[error("string preprocessor violates its contract: {reason}")]
    PreprocessorContract { reason: String },

    #[error("cluster id list has {ids} entries but the string list has {strings}")]
    LengthMismatch { strings: usize, ids: usize },

    #[error("no clusterer registered for distance metric {metric}")]
    MetricNotRegistered { metric: String },
}

impl Categorized for ClusteringError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::LengthMismatch { .. } | Self::MetricNotRegistered { .. } => {
                ErrorCategory::ConsistencyViolation
            }
            _ => ErrorCategory::InvalidArgument,
        }
    }
}
