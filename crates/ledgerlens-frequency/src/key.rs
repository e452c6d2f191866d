//! Grouping-key derivation per frequency option.

use ledgerlens_core::errors::{FrequencyError, LedgerlensError, LedgerlensResult};
use ledgerlens_core::models::{FrequencyKey, FrequencyOption, FrequencyUniqueKey, Transaction};
use ledgerlens_core::traits::IClusterAssignments;

/// Grouping key of every transaction under `option`, aligned with `transactions`.
///
/// Raw keys are copied verbatim. The clustered key looks each description up
/// in the assignments served by `assignments`; a description the clusterer
/// was never built over is a consistency violation and aborts the whole
/// derivation.
pub fn derive_keys(
    transactions: &[Transaction],
    option: &FrequencyOption,
    assignments: &dyn IClusterAssignments,
) -> LedgerlensResult<Vec<FrequencyUniqueKey>> {
    match &option.key {
        FrequencyKey::Category => Ok(transactions
            .iter()
            .map(|tx| FrequencyUniqueKey::Text(tx.category.clone()))
            .collect()),
        FrequencyKey::TransactionDescription => Ok(transactions
            .iter()
            .map(|tx| FrequencyUniqueKey::Text(tx.transaction_description.clone()))
            .collect()),
        FrequencyKey::ClusteredTransactionDescription(params) => {
            let ids = assignments.cluster_assignments(params)?;
            transactions
                .iter()
                .map(|tx| {
                    ids.get(&tx.transaction_description)
                        .map(|&id| FrequencyUniqueKey::Cluster(id))
                        .ok_or_else(|| {
                            LedgerlensError::from(FrequencyError::UnknownDescription {
                                description: tx.transaction_description.clone(),
                                metric: params.distance_measure.to_string(),
                            })
                        })
                })
                .collect()
        }
    }
}
