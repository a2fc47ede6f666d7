//! Error types for analytics operations

use crate::error::AppError;

/// Result type for analytics operations
pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur in analytics operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyticsError {
    /// Nothing to summarize
    #[error("No data available: {0}")]
    EmptyInput(String),

    /// Invalid date range
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Export failed
    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl AnalyticsError {
    /// True when the error means "there was nothing to analyze"
    pub fn is_empty_input(&self) -> bool {
        matches!(self, AnalyticsError::EmptyInput(_))
    }
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::EmptyInput(msg) => AppError::NoData(msg),
            AnalyticsError::InvalidDateRange(msg)
            | AnalyticsError::InvalidConfiguration(msg) => AppError::Configuration(msg),
            AnalyticsError::UnsupportedFormat(msg) => AppError::Validation(msg),
            AnalyticsError::ExportFailed(_) => AppError::Internal(err.to_string()),
        }
    }
}
