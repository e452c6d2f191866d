//! Structured log events for key operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// A clusterer finished building its distance matrix and linkage tree.
pub fn clusterer_built(metric: &str, linkage: &str, strings: usize, unique_preprocessed: usize) {
    tracing::info!(
        event = "clusterer_built",
        metric = %metric,
        linkage = %linkage,
        strings = strings,
        unique_preprocessed = unique_preprocessed,
        "clusterer built"
    );
}

/// A clusterer rebuilt its linkage tree for a new method.
pub fn linkage_rebuilt(metric: &str, from: &str, to: &str) {
    tracing::debug!(
        event = "linkage_rebuilt",
        metric = %metric,
        from = %from,
        to = %to,
        "linkage tree rebuilt"
    );
}

/// The threshold search could not hit the requested cluster count exactly.
pub fn threshold_search_degraded(
    metric: &str,
    linkage: &str,
    target: usize,
    achieved: usize,
    threshold: f64,
) {
    tracing::debug!(
        event = "threshold_search_degraded",
        metric = %metric,
        linkage = %linkage,
        target = target,
        achieved = achieved,
        threshold = threshold,
        "threshold search settled on closest achievable cluster count"
    );
}

/// Frequencies were recomputed for every transaction.
pub fn frequency_recomputed(unique_key: &str, per: &str, groups: usize, transactions: usize) {
    tracing::info!(
        event = "frequency_recomputed",
        unique_key = %unique_key,
        per = %per,
        groups = groups,
        transactions = transactions,
        "frequency recomputed"
    );
}

/// A ledger was ingested.
pub fn dataset_loaded(source: &str, transactions: usize, unique_descriptions: usize) {
    tracing::info!(
        event = "dataset_loaded",
        source = %source,
        transactions = transactions,
        unique_descriptions = unique_descriptions,
        "dataset loaded"
    );
}
