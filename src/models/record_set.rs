use crate::models::transaction::TransactionRecord;
use serde::{Deserialize, Serialize};

/// Immutable, ordered batch of transaction records
///
/// Order is load order. It carries no meaning beyond serving as the stable
/// tie-break for grouping and ranking. The engine only ever reads a
/// `RecordSet`; narrowing it produces a new set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<TransactionRecord>,
}

impl RecordSet {
    /// Wrap already-validated records
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Per-record revenue, in load order
    pub fn revenues(&self) -> Vec<f64> {
        self.records.iter().map(TransactionRecord::revenue).collect()
    }

    /// New set holding the records matching `predicate`, order preserved
    pub fn filter_by<P>(&self, predicate: P) -> RecordSet
    where
        P: Fn(&TransactionRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }
}

impl FromIterator<TransactionRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: u64, product: &str, quantity: u32, price: f64) -> TransactionRecord {
        TransactionRecord::new(
            id,
            product,
            quantity,
            price,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_empty_set() {
        let set = RecordSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.revenues().is_empty());
    }

    #[test]
    fn test_revenues_follow_load_order() {
        let set = RecordSet::new(vec![record(1, "A", 2, 10.0), record(2, "B", 1, 5.0)]);
        assert_eq!(set.revenues(), vec![20.0, 5.0]);
    }

    #[test]
    fn test_filter_by_preserves_order_and_source() {
        let set = RecordSet::new(vec![
            record(1, "A", 1, 1.0),
            record(2, "B", 1, 1.0),
            record(3, "A", 1, 1.0),
        ]);

        let only_a = set.filter_by(|r| r.product == "A");
        let ids: Vec<u64> = only_a.iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![1, 3]);
        assert_eq!(set.len(), 3);
    }
}
