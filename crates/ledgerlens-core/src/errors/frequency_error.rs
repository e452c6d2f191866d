use super::error_category::{Categorized, ErrorCategory};

/// Frequency-derivation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrequencyError {
    #[error("invalid unique key: {value}, must be one of {expected}")]
    UnknownUniqueKey { value: String, expected: String },

    #[error("invalid period: {value}, must be one of {expected}")]
    UnknownPeriod { value: String, expected: String },

    #[error(
        "distanceMeasure, linkageMethod and numberOfCluster must be provided together; missing: {}",
        .missing.join(", ")
    )]
    IncompleteClusteringParams { missing: Vec<&'static str> },

    #[error("numberOfCluster must be at least 1")]
    ZeroClusterCount,

    #[error("description {description:?} is not among the unique descriptions clustered for {metric}")]
    UnknownDescription { description: String, metric: String },
}

impl Categorized for FrequencyError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownDescription { .. } => ErrorCategory::ConsistencyViolation,
            _ => ErrorCategory::InvalidArgument,
        }
    }
}
