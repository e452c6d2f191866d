//! Integration tests for the clusterer registry.

use std::sync::Arc;
use std::thread;

use ledgerlens_clustering::{ClustererRegistry, DefaultPreprocessor};
use ledgerlens_core::errors::{Categorized, ErrorCategory, FrequencyError, LedgerlensError};
use ledgerlens_core::models::{ClusteringParams, DistanceMetric, LinkageMethod};
use ledgerlens_core::traits::IClusterAssignments;

fn descriptions() -> Vec<String> {
    ["aaaa", "zzzz", "aaab", "zzzy", "aaaa", "aaba", "zzyz"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn registry() -> ClustererRegistry {
    ClustererRegistry::build(
        descriptions(),
        &DistanceMetric::ALL,
        LinkageMethod::Average,
        Arc::new(DefaultPreprocessor),
    )
    .unwrap()
}

#[test]
fn builds_one_clusterer_per_metric() {
    let registry = registry();
    assert_eq!(registry.metrics(), DistanceMetric::ALL.to_vec());
    assert_eq!(registry.descriptions().len(), 6);
    for metric in DistanceMetric::ALL {
        let data = registry
            .with_clusterer(metric, |c| c.data_list().to_vec())
            .unwrap();
        assert_eq!(data, registry.descriptions());
    }
}

#[test]
fn subset_of_metrics_can_be_prebuilt() {
    let registry = ClustererRegistry::build(
        descriptions(),
        &[DistanceMetric::Hamming, DistanceMetric::Hamming],
        LinkageMethod::Single,
        Arc::new(DefaultPreprocessor),
    )
    .unwrap();
    assert_eq!(registry.metrics(), vec![DistanceMetric::Hamming]);
    assert!(!registry.contains(DistanceMetric::Levenshtein));
}

#[test]
fn assignments_map_every_unique_description() {
    let registry = registry();
    let params = ClusteringParams {
        distance_measure: DistanceMetric::Levenshtein,
        linkage_method: LinkageMethod::Complete,
        number_of_cluster: 2,
    };
    let map = registry.cluster_assignments(&params).unwrap();
    assert_eq!(map.len(), 6);
    assert_eq!(map["aaaa"], map["aaab"]);
    assert_eq!(map["aaaa"], map["aaba"]);
    assert_eq!(map["zzzz"], map["zzyz"]);
    assert_ne!(map["aaaa"], map["zzzz"]);
}

#[test]
fn per_request_linkage_does_not_change_stored_method() {
    let registry = registry();
    registry
        .cluster_ids(DistanceMetric::Levenshtein, LinkageMethod::Ward, 2)
        .unwrap();
    assert_eq!(
        registry.linkage_method(DistanceMetric::Levenshtein).unwrap(),
        LinkageMethod::Average
    );
}

#[test]
fn set_and_cluster_updates_stored_method() {
    let registry = registry();
    let ids = registry
        .set_and_cluster(DistanceMetric::Levenshtein, LinkageMethod::Single, 2)
        .unwrap();
    assert_eq!(ids, vec![1, 2, 1, 2, 1, 2]);
    assert_eq!(
        registry.linkage_method(DistanceMetric::Levenshtein).unwrap(),
        LinkageMethod::Single
    );
}

#[test]
fn zero_cluster_count_is_rejected() {
    let registry = registry();
    let params = ClusteringParams {
        distance_measure: DistanceMetric::Levenshtein,
        linkage_method: LinkageMethod::Average,
        number_of_cluster: 0,
    };
    let err = registry.cluster_assignments(&params).unwrap_err();
    assert_eq!(err, LedgerlensError::Frequency(FrequencyError::ZeroClusterCount));
    assert_eq!(err.category(), ErrorCategory::InvalidArgument);
}

#[test]
fn concurrent_linkage_changes_and_reads_stay_consistent() {
    let registry = Arc::new(registry());
    let handles: Vec<_> = LinkageMethod::ALL
        .into_iter()
        .map(|linkage| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..5 {
                    registry
                        .set_linkage_method(DistanceMetric::Levenshtein, linkage)
                        .unwrap();
                    let view = registry
                        .view(DistanceMetric::Levenshtein, linkage)
                        .unwrap();
                    assert_eq!(view.linkage_method(), linkage);
                    assert_eq!(view.cluster_ids(2).unwrap().len(), 6);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
