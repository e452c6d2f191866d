//! Property tests for ledgerlens-frequency.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use ledgerlens_core::models::{FrequencyUniqueKey, Period, Transaction};
use ledgerlens_frequency::{period_span, FrequencyAggregator};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn period() -> impl Strategy<Value = Period> {
    prop_oneof![Just(Period::Day), Just(Period::Month)]
}

// Span is at least one period and grows with the gap.
proptest! {
    #[test]
    fn prop_span_at_least_one(start in 0i64..2000, gap in 0i64..2000, per in period()) {
        let first = base() + Duration::days(start);
        let last = first + Duration::days(gap);
        let span = period_span(first, last, per);
        prop_assert!(span >= 1);
        prop_assert!(period_span(first, last + Duration::days(40), per) >= span);
        if per == Period::Day {
            prop_assert_eq!(i64::from(span), gap + 1);
        }
    }
}

// Frequency never exceeds the group size and is shared by every member.
proptest! {
    #[test]
    fn prop_frequency_bounded_by_count(
        rows in prop::collection::vec((0u8..4, 0i64..900), 1..40),
        per in period(),
    ) {
        let txs: Vec<Transaction> = rows
            .iter()
            .enumerate()
            .map(|(i, (_, offset))| {
                Transaction::new(i.to_string(), base() + Duration::days(*offset), "d", "c")
            })
            .collect();
        let keys: Vec<FrequencyUniqueKey> = rows
            .iter()
            .map(|(group, _)| FrequencyUniqueKey::Cluster(u32::from(*group)))
            .collect();

        let result = FrequencyAggregator::new(per).aggregate(&txs, keys.clone());
        prop_assert_eq!(result.assignments.len(), txs.len());

        for (a, key) in result.assignments.iter().zip(&keys) {
            let count = keys.iter().filter(|k| *k == key).count();
            prop_assert!(a.frequency > 0.0);
            prop_assert!(a.frequency <= count as f64);
        }
        for a in &result.assignments {
            for b in &result.assignments {
                if a.frequency_unique_key == b.frequency_unique_key {
                    prop_assert_eq!(a.frequency, b.frequency);
                }
            }
        }
    }
}
