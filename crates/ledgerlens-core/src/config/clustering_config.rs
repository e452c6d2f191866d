use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::{DistanceMetric, LinkageMethod};

/// String-clustering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// One clusterer is prebuilt per metric listed here.
    pub metrics: Vec<DistanceMetric>,
    /// Linkage method every clusterer starts with.
    pub default_linkage_method: LinkageMethod,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            metrics: defaults::DEFAULT_METRICS.to_vec(),
            default_linkage_method: defaults::DEFAULT_LINKAGE_METHOD,
        }
    }
}
