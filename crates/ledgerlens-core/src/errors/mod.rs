//! Error handling for LedgerLens.
//! One error enum per subsystem, `thiserror` only, aggregated by [`LedgerlensError`].

pub mod clustering_error;
pub mod config_error;
pub mod dataset_error;
pub mod error_category;
pub mod frequency_error;
pub mod ledgerlens_error;

pub use clustering_error::ClusteringError;
pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use error_category::{Categorized, ErrorCategory};
pub use frequency_error::FrequencyError;
pub use ledgerlens_error::{LedgerlensError, LedgerlensResult};
