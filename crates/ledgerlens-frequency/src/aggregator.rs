//! Count-over-span frequency per group, broadcast to every member.

use std::collections::HashMap;

use chrono::NaiveDate;
use ledgerlens_core::errors::LedgerlensResult;
use ledgerlens_core::models::{FrequencyOption, FrequencyUniqueKey, Period, Transaction};
use ledgerlens_core::traits::IClusterAssignments;
use ledgerlens_observability::events;
use serde::Serialize;

use crate::key::derive_keys;
use crate::span::period_span;

/// Derived columns of one transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyAssignment {
    pub transaction_number: String,
    pub frequency_unique_key: FrequencyUniqueKey,
    pub frequency: f64,
}

/// Result of one full recomputation, aligned with the input transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyResult {
    pub per: Period,
    pub assignments: Vec<FrequencyAssignment>,
    /// Number of distinct grouping keys.
    pub groups: usize,
}

impl FrequencyResult {
    /// transactionNumber → frequency.
    pub fn by_transaction_number(&self) -> HashMap<String, f64> {
        self.assignments
            .iter()
            .map(|a| (a.transaction_number.clone(), a.frequency))
            .collect()
    }

    /// Write the derived columns back onto `transactions`, matched by
    /// transaction number.
    pub fn apply_to(&self, transactions: &mut [Transaction]) {
        let by_number: HashMap<&str, &FrequencyAssignment> = self
            .assignments
            .iter()
            .map(|a| (a.transaction_number.as_str(), a))
            .collect();
        for tx in transactions.iter_mut() {
            if let Some(assignment) = by_number.get(tx.transaction_number.as_str()) {
                tx.frequency_unique_key = Some(assignment.frequency_unique_key.clone());
                tx.frequency = Some(assignment.frequency);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct GroupStats {
    count: usize,
    first: NaiveDate,
    last: NaiveDate,
}

impl GroupStats {
    fn new(date: NaiveDate) -> Self {
        Self {
            count: 1,
            first: date,
            last: date,
        }
    }

    fn add(&mut self, date: NaiveDate) {
        self.count += 1;
        self.first = self.first.min(date);
        self.last = self.last.max(date);
    }

    fn frequency(&self, per: Period) -> f64 {
        self.count as f64 / f64::from(period_span(self.first, self.last, per))
    }
}

/// Groups transactions by precomputed keys and computes per-group frequency.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyAggregator {
    per: Period,
}

impl FrequencyAggregator {
    pub fn new(per: Period) -> Self {
        Self { per }
    }

    pub fn per(&self) -> Period {
        self.per
    }

    /// Frequency for every transaction given its key. `keys` is aligned with
    /// `transactions`; extra entries on either side are ignored.
    pub fn aggregate(&self, transactions: &[Transaction], keys: Vec<FrequencyUniqueKey>) -> FrequencyResult {
        let mut groups: HashMap<&FrequencyUniqueKey, GroupStats> = HashMap::new();
        for (tx, key) in transactions.iter().zip(&keys) {
            groups
                .entry(key)
                .and_modify(|g| g.add(tx.transaction_date))
                .or_insert_with(|| GroupStats::new(tx.transaction_date));
        }

        let frequencies: HashMap<&FrequencyUniqueKey, f64> = groups
            .iter()
            .map(|(key, stats)| (*key, stats.frequency(self.per)))
            .collect();
        let group_count = frequencies.len();

        let assignments = transactions
            .iter()
            .zip(&keys)
            .map(|(tx, key)| FrequencyAssignment {
                transaction_number: tx.transaction_number.clone(),
                frequency_unique_key: key.clone(),
                frequency: frequencies.get(key).copied().unwrap_or_default(),
            })
            .collect();

        FrequencyResult {
            per: self.per,
            assignments,
            groups: group_count,
        }
    }
}

/// Full recomputation: derive keys under `option`, then aggregate.
pub fn compute_frequency(
    transactions: &[Transaction],
    option: &FrequencyOption,
    assignments: &dyn IClusterAssignments,
) -> LedgerlensResult<FrequencyResult> {
    let span = ledgerlens_observability::frequency_span!(option.unique_key(), option.per);
    let _guard = span.enter();

    let keys = derive_keys(transactions, option, assignments)?;
    let result = FrequencyAggregator::new(option.per).aggregate(transactions, keys);

    events::frequency_recomputed(
        option.unique_key().as_str(),
        option.per.as_str(),
        result.groups,
        transactions.len(),
    );
    Ok(result)
}
