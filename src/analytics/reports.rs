//! Report types and record filtering

use crate::analytics::aggregation::AggregateRow;
use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::analytics::ranking::RankMetric;
use crate::analytics::statistics::StatisticsSummary;
use crate::models::{RecordSet, TransactionRecord, YearMonth};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Filter criteria applied to records before a report is assembled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Inclusive lower bound on `sale_date`
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on `sale_date`
    pub end_date: Option<NaiveDate>,
    /// Products to keep. An empty list applies no product restriction.
    pub products: Option<Vec<String>>,
}

impl ReportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn with_end_date(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_products(mut self, products: Vec<String>) -> Self {
        self.products = Some(products);
        self
    }

    /// True when no criterion is set
    pub fn is_unrestricted(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.product_set().is_none()
    }

    fn product_set(&self) -> Option<HashSet<&str>> {
        self.products
            .as_ref()
            .filter(|list| !list.is_empty())
            .map(|list| list.iter().map(String::as_str).collect())
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(AnalyticsError::InvalidDateRange(format!(
                    "start date {} is after end date {}",
                    start, end
                )));
            }
        }
        Ok(())
    }

    /// New record set holding only the matching records, in load order
    pub fn apply(&self, records: &RecordSet) -> AnalyticsResult<RecordSet> {
        self.validate()?;

        if self.is_unrestricted() {
            return Ok(records.clone());
        }

        let products = self.product_set();

        Ok(records.filter_by(|record| {
            self.matches_date(record)
                && products
                    .as_ref()
                    .map_or(true, |set| set.contains(record.product.as_str()))
        }))
    }

    fn matches_date(&self, record: &TransactionRecord) -> bool {
        if let Some(start) = self.start_date {
            if record.sale_date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.sale_date > end {
                return false;
            }
        }
        true
    }
}

/// Transaction-level totals shown next to the revenue statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOverview {
    pub total_transactions: usize,
    pub total_items_sold: u64,
    pub unique_products: usize,
    pub average_quantity_per_sale: f64,
    pub average_unit_price: f64,
    pub first_sale_date: NaiveDate,
    pub last_sale_date: NaiveDate,
}

impl SalesOverview {
    pub fn from_records(records: &RecordSet) -> AnalyticsResult<Self> {
        let first = records.iter().next().ok_or_else(|| {
            AnalyticsError::EmptyInput("No transactions to summarize".to_string())
        })?;

        let mut total_items_sold = 0u64;
        let mut price_sum = 0.0;
        let mut first_sale_date = first.sale_date;
        let mut last_sale_date = first.sale_date;
        let mut products = HashSet::new();

        for record in records {
            total_items_sold += u64::from(record.quantity);
            price_sum += record.unit_price;
            first_sale_date = first_sale_date.min(record.sale_date);
            last_sale_date = last_sale_date.max(record.sale_date);
            products.insert(record.product.as_str());
        }

        let total_transactions = records.len();

        Ok(Self {
            total_transactions,
            total_items_sold,
            unique_products: products.len(),
            average_quantity_per_sale: total_items_sold as f64 / total_transactions as f64,
            average_unit_price: price_sum / total_transactions as f64,
            first_sale_date,
            last_sale_date,
        })
    }
}

/// Complete sales analysis
///
/// Holds no timestamps or generated identifiers: assembling the same records
/// twice yields equal reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Distribution of per-record revenue
    pub overall: StatisticsSummary,

    pub overview: SalesOverview,

    /// Metric the product ranking was ordered by
    pub rank_metric: RankMetric,

    /// Best products, descending by `rank_metric`
    pub top_products: Vec<AggregateRow<String>>,

    /// Monthly breakdown, chronological
    pub monthly: Vec<AggregateRow<YearMonth>>,

    /// Distribution of monthly revenue sums
    pub monthly_statistics: StatisticsSummary,
}

impl Report {
    pub fn total_revenue(&self) -> f64 {
        self.overall.sum
    }

    /// Month with the highest revenue; the earliest wins a tie
    pub fn best_month(&self) -> Option<&AggregateRow<YearMonth>> {
        self.monthly.iter().reduce(|best, row| {
            match row.revenue_sum.partial_cmp(&best.revenue_sum) {
                Some(Ordering::Greater) => row,
                _ => best,
            }
        })
    }

    /// Month with the lowest revenue; the earliest wins a tie
    pub fn worst_month(&self) -> Option<&AggregateRow<YearMonth>> {
        self.monthly.iter().reduce(|worst, row| {
            match row.revenue_sum.partial_cmp(&worst.revenue_sum) {
                Some(Ordering::Less) => row,
                _ => worst,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records() -> RecordSet {
        RecordSet::new(vec![
            TransactionRecord::new(1, "Laptop", 2, 1000.0, date(2024, 1, 5)),
            TransactionRecord::new(2, "Laptop", 1, 1000.0, date(2024, 2, 10)),
            TransactionRecord::new(3, "Mouse", 5, 20.0, date(2024, 1, 20)),
        ])
    }

    fn ids(set: &RecordSet) -> Vec<u64> {
        set.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_unrestricted_filter_keeps_everything() {
        let filter = ReportFilter::new();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(&records()).unwrap(), records());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = ReportFilter::new().with_date_range(date(2024, 1, 5), date(2024, 1, 20));
        assert_eq!(ids(&filter.apply(&records()).unwrap()), vec![1, 3]);

        let from_feb = ReportFilter::new().with_start_date(date(2024, 2, 1));
        assert_eq!(ids(&from_feb.apply(&records()).unwrap()), vec![2]);

        let until_jan_10 = ReportFilter::new().with_end_date(date(2024, 1, 10));
        assert_eq!(ids(&until_jan_10.apply(&records()).unwrap()), vec![1]);
    }

    #[test]
    fn test_product_filter() {
        let filter = ReportFilter::new().with_products(vec!["Mouse".to_string()]);
        assert_eq!(ids(&filter.apply(&records()).unwrap()), vec![3]);

        let no_selection = ReportFilter::new().with_products(vec![]);
        assert!(no_selection.is_unrestricted());
        assert_eq!(no_selection.apply(&records()).unwrap(), records());

        let unknown = ReportFilter::new().with_products(vec!["Tablet".to_string()]);
        assert!(unknown.apply(&records()).unwrap().is_empty());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let filter = ReportFilter::new().with_date_range(date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(
            filter.apply(&records()),
            Err(AnalyticsError::InvalidDateRange(_))
        ));
    }

    #[test]
    fn test_overview() {
        let overview = SalesOverview::from_records(&records()).unwrap();

        assert_eq!(overview.total_transactions, 3);
        assert_eq!(overview.total_items_sold, 8);
        assert_eq!(overview.unique_products, 2);
        assert!((overview.average_quantity_per_sale - 8.0 / 3.0).abs() < 1e-12);
        assert!((overview.average_unit_price - 2020.0 / 3.0).abs() < 1e-9);
        assert_eq!(overview.first_sale_date, date(2024, 1, 5));
        assert_eq!(overview.last_sale_date, date(2024, 2, 10));
    }

    #[test]
    fn test_overview_of_nothing_is_an_error() {
        let err = SalesOverview::from_records(&RecordSet::default()).unwrap_err();
        assert!(err.is_empty_input());
    }
}
