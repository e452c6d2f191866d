use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::{FrequencyKey, FrequencyOption, Period, UniqueKey};

/// Frequency option applied when a dataset is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    /// Raw key only; the clustered key needs per-request parameters.
    pub default_unique_key: UniqueKey,
    pub default_per: Period,
}

impl FrequencyConfig {
    /// The startup option, or `None` when the configured key needs clustering parameters.
    pub fn initial_option(&self) -> Option<FrequencyOption> {
        let key = match self.default_unique_key {
            UniqueKey::Category => FrequencyKey::Category,
            UniqueKey::TransactionDescription => FrequencyKey::TransactionDescription,
            UniqueKey::ClusteredTransactionDescription => return None,
        };
        Some(FrequencyOption::new(key, self.default_per))
    }
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            default_unique_key: defaults::DEFAULT_UNIQUE_KEY,
            default_per: defaults::DEFAULT_PER,
        }
    }
}
