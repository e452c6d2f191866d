use serde::{Deserialize, Serialize};

use super::defaults;

/// Ledger ingestion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Ledger CSV loaded at startup.
    pub csv_path: Option<String>,
    /// Parse ambiguous dates as day/month/year.
    pub day_first: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            day_first: defaults::DEFAULT_DAY_FIRST,
        }
    }
}
