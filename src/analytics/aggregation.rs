//! Grouping of transaction records into per-key aggregates

use crate::models::{RecordSet, TransactionRecord, YearMonth};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Summary of every record mapped to one group key
///
/// Values are unrounded. Rounding to currency precision belongs to the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow<K> {
    pub key: K,

    /// Sum of `quantity * unit_price`
    pub revenue_sum: f64,

    pub quantity_sum: u64,

    /// Number of records in the group
    pub count: u64,

    /// Mean of the records' unit prices (not weighted by quantity)
    pub avg_unit_price: f64,
}

impl<K> AggregateRow<K> {
    /// Mean revenue per sale in this group
    pub fn avg_revenue(&self) -> f64 {
        self.revenue_sum / self.count as f64
    }
}

/// Running totals for a single group
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupAccumulator {
    revenue_sum: f64,
    quantity_sum: u64,
    count: u64,
    unit_price_sum: f64,
}

impl GroupAccumulator {
    pub fn accumulate(&mut self, record: &TransactionRecord) {
        self.revenue_sum += record.revenue();
        self.quantity_sum += u64::from(record.quantity);
        self.count += 1;
        self.unit_price_sum += record.unit_price;
    }

    /// Close the group into a row.
    ///
    /// Groups only exist once a record has been accumulated, so `count` is
    /// never zero here.
    pub fn finish<K>(self, key: K) -> AggregateRow<K> {
        AggregateRow {
            key,
            revenue_sum: self.revenue_sum,
            quantity_sum: self.quantity_sum,
            count: self.count,
            avg_unit_price: self.unit_price_sum / self.count as f64,
        }
    }
}

/// Record aggregator
pub struct Aggregator;

impl Aggregator {
    /// Partition `records` by `key_fn` and fold every group with `reduce_fn`.
    ///
    /// Groups come back in the order their key was first seen.
    pub fn group_by<K, A, F, R>(records: &RecordSet, key_fn: F, reduce_fn: R) -> Vec<(K, A)>
    where
        K: Hash + Eq,
        A: Default,
        F: Fn(&TransactionRecord) -> K,
        R: Fn(&mut A, &TransactionRecord),
    {
        let mut groups: IndexMap<K, A> = IndexMap::new();

        for record in records {
            reduce_fn(groups.entry(key_fn(record)).or_default(), record);
        }

        groups.into_iter().collect()
    }

    /// Group by `key_fn` and reduce each group to an [`AggregateRow`]
    pub fn summarize<K, F>(records: &RecordSet, key_fn: F) -> Vec<AggregateRow<K>>
    where
        K: Hash + Eq,
        F: Fn(&TransactionRecord) -> K,
    {
        Self::group_by(records, key_fn, GroupAccumulator::accumulate)
            .into_iter()
            .map(|(key, acc)| acc.finish(key))
            .collect()
    }

    /// Aggregate per product, first-seen order
    pub fn by_product(records: &RecordSet) -> Vec<AggregateRow<String>> {
        Self::summarize(records, |record| record.product.clone())
    }

    /// Aggregate per calendar month, first-seen order
    pub fn by_month(records: &RecordSet) -> Vec<AggregateRow<YearMonth>> {
        Self::summarize(records, TransactionRecord::year_month)
    }
}

/// Total revenue across aggregated rows
pub fn total_revenue<K>(rows: &[AggregateRow<K>]) -> f64 {
    rows.iter().map(|row| row.revenue_sum).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: u64, product: &str, quantity: u32, price: f64, date: (i32, u32, u32)) -> TransactionRecord {
        TransactionRecord::new(
            id,
            product,
            quantity,
            price,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    fn sample() -> RecordSet {
        RecordSet::new(vec![
            record(1, "Laptop", 2, 1000.0, (2024, 1, 5)),
            record(2, "Laptop", 1, 1000.0, (2024, 2, 10)),
            record(3, "Mouse", 5, 20.0, (2024, 1, 20)),
        ])
    }

    #[test]
    fn test_empty_records_give_no_rows() {
        let empty = RecordSet::default();
        assert!(Aggregator::by_product(&empty).is_empty());
        assert!(Aggregator::by_month(&empty).is_empty());
    }

    #[test]
    fn test_by_product() {
        let rows = Aggregator::by_product(&sample());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "Laptop");
        assert_eq!(rows[0].revenue_sum, 3000.0);
        assert_eq!(rows[0].quantity_sum, 3);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].avg_unit_price, 1000.0);
        assert_eq!(rows[0].avg_revenue(), 1500.0);

        assert_eq!(rows[1].key, "Mouse");
        assert_eq!(rows[1].revenue_sum, 100.0);
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn test_by_month() {
        let rows = Aggregator::by_month(&sample());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key.to_string(), "2024-01");
        assert_eq!(rows[0].revenue_sum, 2100.0);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].key.to_string(), "2024-02");
        assert_eq!(rows[1].revenue_sum, 1000.0);
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn test_keys_keep_first_seen_order() {
        let records = RecordSet::new(vec![
            record(1, "Zebra", 1, 1.0, (2024, 3, 1)),
            record(2, "Apple", 1, 1.0, (2024, 1, 1)),
            record(3, "Zebra", 1, 1.0, (2024, 2, 1)),
        ]);

        let products: Vec<_> = Aggregator::by_product(&records)
            .into_iter()
            .map(|row| row.key)
            .collect();
        assert_eq!(products, vec!["Zebra", "Apple"]);

        let months: Vec<_> = Aggregator::by_month(&records)
            .into_iter()
            .map(|row| row.key.to_string())
            .collect();
        assert_eq!(months, vec!["2024-03", "2024-01", "2024-02"]);
    }

    #[test]
    fn test_avg_unit_price_is_unweighted() {
        let records = RecordSet::new(vec![
            record(1, "Cable", 9, 10.0, (2024, 1, 1)),
            record(2, "Cable", 1, 20.0, (2024, 1, 2)),
        ]);

        let rows = Aggregator::by_product(&records);
        assert_eq!(rows[0].avg_unit_price, 15.0);
    }

    #[test]
    fn test_revenue_is_conserved_across_groupings() {
        let records = sample();
        let per_record: f64 = records.revenues().iter().sum();

        assert_eq!(total_revenue(&Aggregator::by_product(&records)), per_record);
        assert_eq!(total_revenue(&Aggregator::by_month(&records)), per_record);
    }

    #[test]
    fn test_group_by_with_custom_reducer() {
        let counts = Aggregator::group_by(
            &sample(),
            |record| record.product.clone(),
            |count: &mut u32, _record| *count += 1,
        );

        assert_eq!(counts, vec![("Laptop".to_string(), 2), ("Mouse".to_string(), 1)]);
    }
}
