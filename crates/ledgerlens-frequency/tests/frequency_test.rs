//! Integration tests for frequency recomputation.

use std::collections::HashMap;

use chrono::NaiveDate;
use ledgerlens_core::errors::{Categorized, ErrorCategory, FrequencyError, LedgerlensError, LedgerlensResult};
use ledgerlens_core::models::{
    ClusteringParams, DistanceMetric, FrequencyKey, FrequencyOption, FrequencyUniqueKey,
    LinkageMethod, Period, Transaction,
};
use ledgerlens_core::traits::IClusterAssignments;
use ledgerlens_frequency::compute_frequency;

/// Assigns by first letter of the description, records the params it saw.
struct FirstLetterClusters {
    known: Vec<String>,
}

impl IClusterAssignments for FirstLetterClusters {
    fn cluster_assignments(&self, params: &ClusteringParams) -> LedgerlensResult<HashMap<String, u32>> {
        assert_eq!(params.number_of_cluster, 2);
        Ok(self
            .known
            .iter()
            .map(|d| (d.clone(), if d.starts_with('t') { 1 } else { 2 }))
            .collect())
    }
}

struct NoClusters;

impl IClusterAssignments for NoClusters {
    fn cluster_assignments(&self, _: &ClusteringParams) -> LedgerlensResult<HashMap<String, u32>> {
        panic!("raw keys must not consult the clusterer");
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ledger() -> Vec<Transaction> {
    vec![
        Transaction::new("T1", date(2023, 1, 3), "tesco stores", "groceries"),
        Transaction::new("T2", date(2023, 1, 17), "tesco metro", "groceries"),
        Transaction::new("T3", date(2023, 2, 3), "tesco stores", "groceries"),
        Transaction::new("T4", date(2023, 1, 28), "amazon", "shopping"),
        Transaction::new("T5", date(2023, 6, 28), "amazon prime", "subscriptions"),
    ]
}

fn clustered(per: Period) -> FrequencyOption {
    FrequencyOption::new(
        FrequencyKey::ClusteredTransactionDescription(ClusteringParams {
            distance_measure: DistanceMetric::Levenshtein,
            linkage_method: LinkageMethod::Average,
            number_of_cluster: 2,
        }),
        per,
    )
}

#[test]
fn category_per_month() {
    let option = FrequencyOption::new(FrequencyKey::Category, Period::Month);
    let result = compute_frequency(&ledger(), &option, &NoClusters).unwrap();
    let freq = result.by_transaction_number();

    // groceries: 3 rows over Jan..Feb.
    assert_eq!(freq["T1"], 1.5);
    assert_eq!(freq["T2"], 1.5);
    assert_eq!(freq["T3"], 1.5);
    assert_eq!(freq["T4"], 1.0);
    assert_eq!(freq["T5"], 1.0);
    assert_eq!(result.groups, 3);
}

#[test]
fn description_per_day() {
    let option = FrequencyOption::new(FrequencyKey::TransactionDescription, Period::Day);
    let result = compute_frequency(&ledger(), &option, &NoClusters).unwrap();
    let freq = result.by_transaction_number();

    // "tesco stores": Jan 3 and Feb 3 → 32 days inclusive.
    assert!((freq["T1"] - 2.0 / 32.0).abs() < 1e-12);
    assert_eq!(freq["T2"], 1.0);
    assert_eq!(result.groups, 4);
}

#[test]
fn clustered_description_per_month() {
    let known = ledger().into_iter().map(|t| t.transaction_description).collect();
    let clusters = FirstLetterClusters { known };
    let result = compute_frequency(&ledger(), &clustered(Period::Month), &clusters).unwrap();

    let keys: Vec<_> = result.assignments.iter().map(|a| a.frequency_unique_key.clone()).collect();
    assert_eq!(keys[0], FrequencyUniqueKey::Cluster(1));
    assert_eq!(keys[3], FrequencyUniqueKey::Cluster(2));

    let freq = result.by_transaction_number();
    // Cluster 1: three rows Jan..Feb. Cluster 2: two rows Jan..Jun.
    assert_eq!(freq["T1"], 1.5);
    assert!((freq["T4"] - 2.0 / 6.0).abs() < 1e-12);
}

#[test]
fn description_missing_from_clusterer_aborts() {
    let clusters = FirstLetterClusters {
        known: vec!["tesco stores".into(), "tesco metro".into(), "amazon".into()],
    };
    let err = compute_frequency(&ledger(), &clustered(Period::Month), &clusters).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ConsistencyViolation);
    assert_eq!(
        err,
        LedgerlensError::Frequency(FrequencyError::UnknownDescription {
            description: "amazon prime".into(),
            metric: "levenshtein".into(),
        })
    );
}

#[test]
fn empty_ledger_has_no_groups() {
    let option = FrequencyOption::default();
    let result = compute_frequency(&[], &option, &NoClusters).unwrap();
    assert!(result.assignments.is_empty());
    assert_eq!(result.groups, 0);
}

#[test]
fn result_serializes_camel_case() {
    let option = FrequencyOption::new(FrequencyKey::Category, Period::Month);
    let result = compute_frequency(&ledger()[..1], &option, &NoClusters).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["per"], "month");
    assert_eq!(json["assignments"][0]["transactionNumber"], "T1");
    assert_eq!(json["assignments"][0]["frequencyUniqueKey"], "groceries");
    assert_eq!(json["assignments"][0]["frequency"], 1.0);
}
