//! Span definitions per operation: clustering, frequency, dataset.

/// Create a clustering span.
#[macro_export]
macro_rules! clustering_span {
    ($metric:expr, $linkage:expr) => {
        tracing::info_span!("ledgerlens.clustering", metric = %$metric, linkage = %$linkage)
    };
}

/// Create a frequency recomputation span.
#[macro_export]
macro_rules! frequency_span {
    ($unique_key:expr, $per:expr) => {
        tracing::info_span!("ledgerlens.frequency", unique_key = %$unique_key, per = %$per)
    };
}

/// Create a dataset loading span.
#[macro_export]
macro_rules! dataset_span {
    ($source:expr) => {
        tracing::info_span!("ledgerlens.dataset", source = %$source)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const CLUSTERING: &str = "ledgerlens.clustering";
    pub const FREQUENCY: &str = "ledgerlens.frequency";
    pub const DATASET: &str = "ledgerlens.dataset";
}
