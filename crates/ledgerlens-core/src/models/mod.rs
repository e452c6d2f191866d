//! Domain models: the transaction row, the clustering enumerations, and the
//! frequency option.

pub mod distance_metric;
pub mod frequency_option;
pub mod linkage_method;
pub mod transaction;

pub use distance_metric::DistanceMetric;
pub use frequency_option::{
    ClusteringParams, FrequencyKey, FrequencyOption, FrequencyOptionRequest, Period, UniqueKey,
};
pub use linkage_method::LinkageMethod;
pub use transaction::{FrequencyUniqueKey, Transaction};
