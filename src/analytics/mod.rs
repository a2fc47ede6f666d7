//! Sales aggregation and statistics engine
//!
//! Turns a [`RecordSet`](crate::models::RecordSet) of sales transactions into
//! a [`Report`]: revenue statistics, a top-N product ranking and a
//! chronological monthly breakdown.
//!
//! # Pipeline
//!
//! - **Aggregation**: single-pass grouping by product or calendar month, keys
//!   in first-seen order
//! - **Ranking**: stable descending sort by a metric, truncated to top-N
//! - **Statistics**: sum, mean, median, population standard deviation, min, max
//! - **Assembly**: composes the above into one report value
//! - **Export**: text summary, CSV and JSON rendering
//!
//! Everything except file export is synchronous and pure. An empty input is
//! reported as [`AnalyticsError::EmptyInput`] rather than as zeroed metrics.
//!
//! # Example
//!
//! ```
//! use sales_analytics::analytics::{ReportAssembler, ReportExporter, ExportFormat};
//! use sales_analytics::models::{RecordSet, TransactionRecord};
//! use chrono::NaiveDate;
//!
//! let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
//! let records = RecordSet::new(vec![
//!     TransactionRecord::new(1, "Laptop", 2, 1000.0, date(1, 5)),
//!     TransactionRecord::new(2, "Laptop", 1, 1000.0, date(2, 10)),
//!     TransactionRecord::new(3, "Mouse", 5, 20.0, date(1, 20)),
//! ]);
//!
//! let report = ReportAssembler::with_defaults().assemble(&records).unwrap();
//! assert_eq!(report.total_revenue(), 3100.0);
//! assert_eq!(report.top_products[0].key, "Laptop");
//!
//! let text = ReportExporter::render(&report, ExportFormat::Text).unwrap();
//! assert!(text.contains("$3,100.00"));
//! ```

mod aggregation;
mod engine;
mod error;
mod export;
mod presentation;
mod ranking;
mod reports;
mod statistics;

pub use aggregation::{total_revenue, AggregateRow, Aggregator, GroupAccumulator};
pub use engine::{assemble, AnalyticsConfig, ReportAssembler};
pub use error::{AnalyticsError, AnalyticsResult};
pub use export::{ExportFormat, ReportExporter};
pub use presentation::{format_currency, format_grouped, render_text, round_currency};
pub use ranking::{RankMetric, Ranker};
pub use reports::{Report, ReportFilter, SalesOverview};
pub use statistics::StatisticsSummary;
