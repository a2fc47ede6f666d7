//! Descriptive statistics over numeric samples

use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};

/// Descriptive statistics for a non-empty sample
///
/// The standard deviation is the population one (divisor `N`): the sample is
/// the complete observed dataset, not a draw from a larger one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub population_stddev: f64,
    pub min: f64,
    pub max: f64,
}

impl StatisticsSummary {
    /// Describe a sample, failing when it is empty
    pub fn describe(values: &[f64]) -> AnalyticsResult<Self> {
        if values.is_empty() {
            return Err(AnalyticsError::EmptyInput(
                "Cannot describe an empty sample".to_string(),
            ));
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        Ok(Self {
            count,
            sum,
            mean,
            median,
            population_stddev: variance.sqrt(),
            min: sorted[0],
            max: sorted[count - 1],
        })
    }

    /// Spread relative to the mean; `None` when the mean is zero
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        (self.mean != 0.0).then(|| self.population_stddev / self.mean)
    }
}
