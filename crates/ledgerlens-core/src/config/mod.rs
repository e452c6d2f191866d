//! Configuration system for LedgerLens.
//! TOML-based, layered: CLI > env (`LEDGERLENS_*`) > file > defaults.

pub mod clustering_config;
pub mod dataset_config;
pub mod defaults;
pub mod frequency_config;
pub mod ledgerlens_config;
pub mod observability_config;

pub use clustering_config::ClusteringConfig;
pub use dataset_config::DatasetConfig;
pub use frequency_config::FrequencyConfig;
pub use ledgerlens_config::{CliOverrides, LedgerlensConfig};
pub use observability_config::ObservabilityConfig;
