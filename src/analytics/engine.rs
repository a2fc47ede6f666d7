//! Report assembly

use crate::analytics::aggregation::Aggregator;
use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::analytics::ranking::{RankMetric, Ranker};
use crate::analytics::reports::{Report, ReportFilter, SalesOverview};
use crate::analytics::statistics::StatisticsSummary;
use crate::models::RecordSet;
use serde::{Deserialize, Serialize};

/// Configuration for report assembly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsConfig {
    /// Number of products kept in the ranking
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Metric the product ranking is ordered by
    #[serde(default)]
    pub rank_metric: RankMetric,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            rank_metric: RankMetric::default(),
        }
    }
}

fn default_top_n() -> usize {
    10
}

/// Composes aggregation, ranking and statistics into a [`Report`].
///
/// Holds only configuration. Every call works on call-local state, so one
/// assembler can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    config: AnalyticsConfig,
}

impl ReportAssembler {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration (top 10 by revenue)
    pub fn with_defaults() -> Self {
        Self::new(AnalyticsConfig::default())
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Build the full report for `records`.
    ///
    /// Fails with [`AnalyticsError::EmptyInput`] when there are no records.
    pub fn assemble(&self, records: &RecordSet) -> AnalyticsResult<Report> {
        if records.is_empty() {
            tracing::warn!("No transactions supplied for report assembly");
            return Err(AnalyticsError::EmptyInput(
                "Cannot build a report from zero transactions".to_string(),
            ));
        }

        let overall = StatisticsSummary::describe(&records.revenues())?;
        let overview = SalesOverview::from_records(records)?;

        let products = Aggregator::by_product(records);
        let top_products = Ranker::top_n_by(&products, self.config.rank_metric, self.config.top_n)?;
        tracing::debug!(
            products = products.len(),
            ranked = top_products.len(),
            metric = %self.config.rank_metric,
            "Ranked products"
        );

        let mut monthly = Aggregator::by_month(records);
        monthly.sort_by_key(|row| row.key);
        let monthly_revenue: Vec<f64> = monthly.iter().map(|row| row.revenue_sum).collect();
        let monthly_statistics = StatisticsSummary::describe(&monthly_revenue)?;
        tracing::debug!(months = monthly.len(), "Aggregated monthly revenue");

        tracing::info!(
            transactions = records.len(),
            total_revenue = overall.sum,
            "Assembled sales report"
        );

        Ok(Report {
            overall,
            overview,
            rank_metric: self.config.rank_metric,
            top_products,
            monthly,
            monthly_statistics,
        })
    }

    /// Apply `filter` and assemble the report over what remains
    pub fn assemble_filtered(
        &self,
        records: &RecordSet,
        filter: &ReportFilter,
    ) -> AnalyticsResult<Report> {
        let filtered = filter.apply(records)?;
        tracing::debug!(
            before = records.len(),
            after = filtered.len(),
            "Applied report filter"
        );
        self.assemble(&filtered)
    }
}

/// Assemble a report with the default configuration
pub fn assemble(records: &RecordSet) -> AnalyticsResult<Report> {
    ReportAssembler::with_defaults().assemble(records)
}
