//! # ledgerlens-frequency
//!
//! Groups transactions by a derived key (raw category, raw description, or
//! clustered description) and computes a per-period recurrence rate for
//! every group, broadcast back to each member transaction.

pub mod aggregator;
pub mod key;
pub mod span;

pub use aggregator::{compute_frequency, FrequencyAggregator, FrequencyAssignment, FrequencyResult};
pub use key::derive_keys;
pub use span::period_span;
