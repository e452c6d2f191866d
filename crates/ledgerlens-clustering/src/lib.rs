//! # ledgerlens-clustering
//!
//! Agglomerative clustering of free-text transaction descriptions:
//! string distance catalog → condensed distance matrix → linkage tree →
//! threshold search → flat cut. One [`HierarchicalStringClusterer`] per
//! distance metric lives in a [`ClustererRegistry`].

pub mod algorithms;
pub mod clusterer;
pub mod cut;
pub mod linkage;
pub mod matrix;
pub mod preprocess;
pub mod registry;
pub mod threshold;

pub use algorithms::distance::{distance_function, distance_function_by_name, DistanceFn};
pub use clusterer::{ClusterInfo, ClusteringView, HierarchicalStringClusterer};
pub use linkage::{build_linkage, LinkageMatrix, Merge};
pub use matrix::CondensedDistanceMatrix;
pub use preprocess::DefaultPreprocessor;
pub use registry::ClustererRegistry;
pub use threshold::{ThresholdSearch, ThresholdSearchOutcome};
