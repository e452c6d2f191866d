//! Property tests for ledgerlens-clustering.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use proptest::sample::Index;

use ledgerlens_clustering::cut::{assign_clusters, cluster_count_at};
use ledgerlens_clustering::{DefaultPreprocessor, HierarchicalStringClusterer, ThresholdSearch};
use ledgerlens_core::models::{DistanceMetric, LinkageMethod};

/// Unique lowercase strings, untouched by the default preprocessor.
fn unique_strings() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-d]{1,5}", 1..12)
        .prop_map(|set: BTreeSet<String>| set.into_iter().collect())
}

fn metric() -> impl Strategy<Value = DistanceMetric> {
    prop::sample::select(DistanceMetric::ALL.to_vec())
}

fn linkage() -> impl Strategy<Value = LinkageMethod> {
    prop::sample::select(LinkageMethod::ALL.to_vec())
}

fn build(data: Vec<String>, metric: DistanceMetric, linkage: LinkageMethod) -> HierarchicalStringClusterer {
    HierarchicalStringClusterer::new(data, 1, metric, linkage, Arc::new(DefaultPreprocessor)).unwrap()
}

// One id per string, each within 1..=n.
proptest! {
    #[test]
    fn prop_output_length(data in unique_strings(), metric in metric(), linkage in linkage(), k in any::<Index>()) {
        let n = data.len();
        let c = build(data, metric, linkage);
        let k = k.index(c.unique_preprocessed()) + 1;
        let ids = c.cluster_ids(k).unwrap();
        prop_assert_eq!(ids.len(), n);
        prop_assert!(ids.iter().all(|&id| id >= 1 && id as usize <= n));
    }
}

// Same inputs, same ids.
proptest! {
    #[test]
    fn prop_idempotent(data in unique_strings(), metric in metric(), linkage in linkage(), k in any::<Index>()) {
        let c = build(data.clone(), metric, linkage);
        let k = k.index(c.unique_preprocessed()) + 1;
        let first = c.cluster_ids(k).unwrap();
        prop_assert_eq!(&first, &c.cluster_ids(k).unwrap());

        let rebuilt = build(data, metric, linkage);
        prop_assert_eq!(first, rebuilt.cluster_ids(k).unwrap());
    }
}

// Threshold inside the merge-distance range, bounded iteration count.
proptest! {
    #[test]
    fn prop_threshold_within_range(data in unique_strings(), metric in metric(), linkage in linkage(), k in any::<Index>()) {
        let c = build(data, metric, linkage);
        let k = k.index(c.unique_preprocessed()) + 1;
        let outcome = ThresholdSearch::default().search(c.linkage_matrix(), k);
        prop_assert!(outcome.iterations <= 100);
        match c.linkage_matrix().distance_range() {
            Some((min, max)) => {
                prop_assert!(outcome.threshold >= min && outcome.threshold <= max);
            }
            None => prop_assert_eq!(outcome.threshold, 0.0),
        }
    }
}

// Cluster count at a threshold agrees with the highest assigned id.
proptest! {
    #[test]
    fn prop_cut_count_matches_assignment(data in unique_strings(), linkage in linkage(), t in 0.0f64..6.0) {
        let c = build(data, DistanceMetric::Levenshtein, linkage);
        let ids = assign_clusters(c.linkage_matrix(), t);
        let max_id = ids.iter().copied().max().unwrap_or(0) as usize;
        prop_assert_eq!(max_id, cluster_count_at(c.linkage_matrix(), t));
    }
}

// Merge distances never decrease for the monotone methods.
proptest! {
    #[test]
    fn prop_monotone_merge_heights(data in unique_strings(), metric in metric()) {
        for linkage in [LinkageMethod::Single, LinkageMethod::Complete, LinkageMethod::Average, LinkageMethod::Weighted, LinkageMethod::Ward] {
            let c = build(data.clone(), metric, linkage);
            let merges = c.linkage_matrix().merges();
            for pair in merges.windows(2) {
                prop_assert!(pair[0].distance <= pair[1].distance);
            }
        }
    }
}
