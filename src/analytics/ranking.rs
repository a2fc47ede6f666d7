//! Top-N ranking of aggregated groups

use crate::analytics::aggregation::AggregateRow;
use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Built-in ranking metrics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    #[default]
    Revenue,
    Quantity,
    #[serde(alias = "sales")]
    Count,
    #[serde(alias = "price")]
    AvgUnitPrice,
}

impl RankMetric {
    /// Value of this metric for a row
    pub fn value<K>(&self, row: &AggregateRow<K>) -> f64 {
        match self {
            RankMetric::Revenue => row.revenue_sum,
            RankMetric::Quantity => row.quantity_sum as f64,
            RankMetric::Count => row.count as f64,
            RankMetric::AvgUnitPrice => row.avg_unit_price,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankMetric::Revenue => "revenue",
            RankMetric::Quantity => "quantity",
            RankMetric::Count => "count",
            RankMetric::AvgUnitPrice => "avg_unit_price",
        }
    }
}

impl fmt::Display for RankMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankMetric {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "revenue" => Ok(RankMetric::Revenue),
            "quantity" => Ok(RankMetric::Quantity),
            "count" | "sales" => Ok(RankMetric::Count),
            "avg_unit_price" | "price" => Ok(RankMetric::AvgUnitPrice),
            other => Err(AnalyticsError::InvalidConfiguration(format!(
                "unknown rank metric '{}'",
                other
            ))),
        }
    }
}

/// Group ranker
pub struct Ranker;

impl Ranker {
    /// The `n` rows with the largest `metric`, descending.
    ///
    /// The sort is stable, so rows with equal metric values keep the order
    /// they came in (first-seen group order from the aggregator). Asking for
    /// more rows than exist returns all of them.
    pub fn top_n<K, M>(
        rows: &[AggregateRow<K>],
        metric: M,
        n: usize,
    ) -> AnalyticsResult<Vec<AggregateRow<K>>>
    where
        K: Clone,
        M: Fn(&AggregateRow<K>) -> f64,
    {
        if n == 0 {
            return Err(AnalyticsError::InvalidConfiguration(
                "top-N ranking requires n >= 1".to_string(),
            ));
        }

        let mut ranked = rows.to_vec();
        ranked.sort_by(|a, b| metric(b).partial_cmp(&metric(a)).unwrap_or(Ordering::Equal));
        ranked.truncate(n);

        Ok(ranked)
    }

    /// [`Ranker::top_n`] using a built-in metric
    pub fn top_n_by<K: Clone>(
        rows: &[AggregateRow<K>],
        metric: RankMetric,
        n: usize,
    ) -> AnalyticsResult<Vec<AggregateRow<K>>> {
        Self::top_n(rows, |row| metric.value(row), n)
    }
}
