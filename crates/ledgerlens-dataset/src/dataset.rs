//! The dataset session: transactions, the clusterer registry built over
//! their unique descriptions, and the active frequency option.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use ledgerlens_clustering::{ClustererRegistry, DefaultPreprocessor};
use ledgerlens_core::config::LedgerlensConfig;
use ledgerlens_core::errors::{ClusteringError, DatasetError, LedgerlensResult};
use ledgerlens_core::models::{
    DistanceMetric, FrequencyOption, FrequencyOptionRequest, LinkageMethod, Transaction,
};
use ledgerlens_core::traits::IStringPreprocessor;
use ledgerlens_frequency::{compute_frequency, FrequencyResult};
use ledgerlens_observability::events;
use serde::Serialize;

use crate::ingest::{read_transactions, read_transactions_from_path};

/// Unique descriptions with their cluster ids, aligned by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringClusters {
    pub distance_metric: DistanceMetric,
    pub linkage_method: LinkageMethod,
    pub number_of_cluster: usize,
    pub strings: Vec<String>,
    pub cluster_ids: Vec<u32>,
}

/// One loaded ledger and everything derived from it.
///
/// The registry is built once, at load time, over the unique descriptions.
/// Frequencies are recomputed in full whenever the option changes; a failed
/// recomputation leaves the previous option and columns in place.
#[derive(Debug)]
pub struct TransactionDataset {
    source: String,
    transactions: Vec<Transaction>,
    registry: Arc<ClustererRegistry>,
    frequency_option: Option<FrequencyOption>,
}

impl TransactionDataset {
    /// Build the session over already-parsed rows, using the default preprocessor.
    pub fn new(
        source: impl Into<String>,
        transactions: Vec<Transaction>,
        config: &LedgerlensConfig,
    ) -> LedgerlensResult<Self> {
        Self::with_preprocessor(source, transactions, config, Arc::new(DefaultPreprocessor))
    }

    pub fn with_preprocessor(
        source: impl Into<String>,
        transactions: Vec<Transaction>,
        config: &LedgerlensConfig,
        preprocessor: Arc<dyn IStringPreprocessor>,
    ) -> LedgerlensResult<Self> {
        let source = source.into();
        let span = ledgerlens_observability::dataset_span!(source);
        let _guard = span.enter();

        if transactions.is_empty() {
            return Err(DatasetError::Empty.into());
        }

        let registry = ClustererRegistry::build(
            transactions.iter().map(|t| t.transaction_description.clone()),
            &config.clustering.metrics,
            config.clustering.default_linkage_method,
            preprocessor,
        )?;
        events::dataset_loaded(&source, transactions.len(), registry.descriptions().len());

        let mut dataset = Self {
            source,
            transactions,
            registry: Arc::new(registry),
            frequency_option: None,
        };
        if let Some(option) = config.frequency.initial_option() {
            dataset.set_frequency_option(option)?;
        }
        Ok(dataset)
    }

    /// Parse a ledger from `reader` and build the session.
    pub fn from_reader<R: Read>(reader: R, config: &LedgerlensConfig) -> LedgerlensResult<Self> {
        let transactions = read_transactions(reader, config.dataset.day_first)?;
        Self::new("<reader>", transactions, config)
    }

    /// Parse the ledger at `path` and build the session.
    pub fn from_csv_path(path: &Path, config: &LedgerlensConfig) -> LedgerlensResult<Self> {
        let transactions = read_transactions_from_path(path, config.dataset.day_first)?;
        Self::new(path.display().to_string(), transactions, config)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn registry(&self) -> &Arc<ClustererRegistry> {
        &self.registry
    }

    /// Unique descriptions the clusterers were built over, first-occurrence order.
    pub fn unique_descriptions(&self) -> &[String] {
        self.registry.descriptions()
    }

    pub fn frequency_option(&self) -> Option<&FrequencyOption> {
        self.frequency_option.as_ref()
    }

    /// Recompute every transaction's key and frequency under `option`.
    pub fn set_frequency_option(&mut self, option: FrequencyOption) -> LedgerlensResult<FrequencyResult> {
        let result = compute_frequency(&self.transactions, &option, self.registry.as_ref())?;
        result.apply_to(&mut self.transactions);
        self.frequency_option = Some(option);
        Ok(result)
    }

    /// Validate a wire-shaped option, then recompute.
    pub fn set_frequency_option_request(
        &mut self,
        request: &FrequencyOptionRequest,
    ) -> LedgerlensResult<FrequencyResult> {
        let option = request.validate()?;
        self.set_frequency_option(option)
    }

    /// transactionNumber → frequency under the active option. Empty until an
    /// option has been applied.
    pub fn frequency_by_transaction_number(&self) -> HashMap<String, f64> {
        self.transactions
            .iter()
            .filter_map(|t| t.frequency.map(|f| (t.transaction_number.clone(), f)))
            .collect()
    }

    /// Cluster ids of the unique descriptions for one `(metric, linkage, k)`.
    pub fn string_clusters(
        &self,
        distance_metric: DistanceMetric,
        linkage_method: LinkageMethod,
        number_of_cluster: usize,
    ) -> LedgerlensResult<StringClusters> {
        let cluster_ids = self
            .registry
            .cluster_ids(distance_metric, linkage_method, number_of_cluster)?;
        let strings = self.registry.descriptions().to_vec();
        if strings.len() != cluster_ids.len() {
            return Err(ClusteringError::LengthMismatch {
                strings: strings.len(),
                ids: cluster_ids.len(),
            }
            .into());
        }
        Ok(StringClusters {
            distance_metric,
            linkage_method,
            number_of_cluster,
            strings,
            cluster_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerlens_core::errors::LedgerlensError;

    fn tx(number: &str, day: u32, description: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2023, 1, day).unwrap();
        Transaction::new(number, date, description, "misc")
    }

    #[test]
    fn empty_ledger_is_rejected() {
        let err = TransactionDataset::new("empty", vec![], &LedgerlensConfig::default()).unwrap_err();
        assert_eq!(err, LedgerlensError::Dataset(DatasetError::Empty));
    }

    #[test]
    fn default_option_is_applied_at_load() {
        let txs = vec![tx("1", 1, "a"), tx("2", 2, "b")];
        let dataset = TransactionDataset::new("mem", txs, &LedgerlensConfig::default()).unwrap();
        assert_eq!(dataset.frequency_option(), Some(&FrequencyOption::default()));
        assert_eq!(dataset.frequency_by_transaction_number()["1"], 2.0);
    }
}
