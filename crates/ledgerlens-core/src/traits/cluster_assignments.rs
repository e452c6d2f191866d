use std::collections::HashMap;

use crate::errors::LedgerlensResult;
use crate::models::ClusteringParams;

/// Source of description → cluster id assignments for the clustered
/// frequency key.
pub trait IClusterAssignments: Send + Sync {
    /// Cluster id of every known unique description under `params`.
    fn cluster_assignments(&self, params: &ClusteringParams) -> LedgerlensResult<HashMap<String, u32>>;
}
