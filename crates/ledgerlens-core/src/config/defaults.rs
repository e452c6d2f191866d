// Single source of truth for all default values.

use crate::models::{DistanceMetric, LinkageMethod, Period, UniqueKey};

// --- Dataset ---
pub const DEFAULT_DAY_FIRST: bool = true;

// --- Clustering ---
pub const DEFAULT_LINKAGE_METHOD: LinkageMethod = LinkageMethod::Average;
pub const DEFAULT_METRICS: [DistanceMetric; 6] = DistanceMetric::ALL;

// --- Frequency ---
pub const DEFAULT_UNIQUE_KEY: UniqueKey = UniqueKey::Category;
pub const DEFAULT_PER: Period = Period::Month;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
