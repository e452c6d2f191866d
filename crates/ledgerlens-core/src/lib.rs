//! # ledgerlens-core
//!
//! Foundation crate for LedgerLens.
//! Defines the transaction model, the clustering and frequency enumerations,
//! errors, config, traits, and constants. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LedgerlensConfig;
pub use errors::{ErrorCategory, LedgerlensError, LedgerlensResult};
pub use models::{
    ClusteringParams, DistanceMetric, FrequencyKey, FrequencyOption, FrequencyOptionRequest,
    FrequencyUniqueKey, LinkageMethod, Period, Transaction, UniqueKey,
};
pub use traits::{IClusterAssignments, IStringPreprocessor};
