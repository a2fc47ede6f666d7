//! Report export formats and utilities

use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::analytics::presentation::{render_text, round_currency};
use crate::analytics::reports::Report;
use crate::analytics::statistics::StatisticsSummary;
use crate::models::RecordSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;

/// Export format for reports
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(AnalyticsError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Report exporter
pub struct ReportExporter;

impl ReportExporter {
    /// Render a report in memory
    pub fn render(report: &Report, format: ExportFormat) -> AnalyticsResult<String> {
        match format {
            ExportFormat::Text => Ok(render_text(report)),
            ExportFormat::Json => serde_json::to_string_pretty(report)
                .map_err(|e| AnalyticsError::ExportFailed(format!("JSON serialization failed: {}", e))),
            ExportFormat::Csv => Ok(Self::render_csv(report)),
        }
    }

    /// Render a report and write it to `output_path`
    pub async fn export(
        report: &Report,
        format: ExportFormat,
        output_path: &Path,
    ) -> AnalyticsResult<Vec<u8>> {
        let bytes = Self::render(report, format)?.into_bytes();

        fs::write(output_path, &bytes).await.map_err(|e| {
            AnalyticsError::ExportFailed(format!(
                "Failed to write {}: {}",
                output_path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %output_path.display(),
            format = format.extension(),
            bytes = bytes.len(),
            "Exported report"
        );

        Ok(bytes)
    }

    /// Filtered transactions as CSV, one row per record with derived revenue
    pub fn render_records(records: &RecordSet) -> String {
        let mut csv = String::from("id,sale_date,product,quantity,unit_price,revenue\n");

        for record in records {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                record.id,
                record.sale_date,
                Self::escape_csv(&record.product),
                record.quantity,
                record.unit_price,
                record.revenue()
            ));
        }

        csv
    }

    /// Write [`ReportExporter::render_records`] output to `output_path`
    pub async fn export_records(records: &RecordSet, output_path: &Path) -> AnalyticsResult<Vec<u8>> {
        let bytes = Self::render_records(records).into_bytes();

        fs::write(output_path, &bytes).await.map_err(|e| {
            AnalyticsError::ExportFailed(format!(
                "Failed to write {}: {}",
                output_path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %output_path.display(),
            records = records.len(),
            bytes = bytes.len(),
            "Exported filtered records"
        );

        Ok(bytes)
    }

    /// CSV with three sections: overall statistics, product ranking, monthly breakdown
    fn render_csv(report: &Report) -> String {
        let overview = &report.overview;
        let mut csv = String::new();

        csv.push_str("metric,value\n");
        Self::push_statistics(&mut csv, "revenue", &report.overall);
        Self::push_statistics(&mut csv, "monthly_revenue", &report.monthly_statistics);
        csv.push_str(&format!("total_items_sold,{}\n", overview.total_items_sold));
        csv.push_str(&format!("total_transactions,{}\n", overview.total_transactions));
        csv.push_str(&format!("unique_products,{}\n", overview.unique_products));
        csv.push_str(&format!(
            "average_quantity_per_sale,{:.2}\n",
            overview.average_quantity_per_sale
        ));
        csv.push_str(&format!(
            "average_unit_price,{:.2}\n\n",
            round_currency(overview.average_unit_price)
        ));

        csv.push_str("rank,product,revenue,quantity,sales,avg_revenue,avg_price\n");
        for (rank, row) in report.top_products.iter().enumerate() {
            csv.push_str(&format!(
                "{},{},{:.2},{},{},{:.2},{:.2}\n",
                rank + 1,
                Self::escape_csv(&row.key),
                round_currency(row.revenue_sum),
                row.quantity_sum,
                row.count,
                round_currency(row.avg_revenue()),
                round_currency(row.avg_unit_price)
            ));
        }
        csv.push('\n');

        csv.push_str("month,revenue,quantity,sales,avg_revenue,avg_price\n");
        for row in &report.monthly {
            csv.push_str(&format!(
                "{},{:.2},{},{},{:.2},{:.2}\n",
                row.key,
                round_currency(row.revenue_sum),
                row.quantity_sum,
                row.count,
                round_currency(row.avg_revenue()),
                round_currency(row.avg_unit_price)
            ));
        }

        csv
    }

    fn push_statistics(csv: &mut String, prefix: &str, stats: &StatisticsSummary) {
        let fields = [
            ("sum", stats.sum),
            ("mean", stats.mean),
            ("median", stats.median),
            ("stddev", stats.population_stddev),
            ("min", stats.min),
            ("max", stats.max),
        ];
        for (name, value) in fields {
            csv.push_str(&format!("{}_{},{:.2}\n", prefix, name, round_currency(value)));
        }
    }

    /// Quote a CSV field when it contains a separator, quote or line break
    fn escape_csv(s: &str) -> String {
        if s.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Text.extension(), "txt");
    }

    #[test]
    fn test_export_format_mime_type() {
        assert_eq!(ExportFormat::Json.mime_type(), "application/json");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ExportFormat::Text.mime_type(), "text/plain");
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(AnalyticsError::UnsupportedFormat(_))
        ));
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("out/report.csv")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(ExportFormat::from_path(&PathBuf::from("report")), None);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(ReportExporter::escape_csv("Laptop"), "Laptop");
        assert_eq!(ReportExporter::escape_csv("Cable, USB-C"), "\"Cable, USB-C\"");
        assert_eq!(ReportExporter::escape_csv("27\" Monitor"), "\"27\"\" Monitor\"");
    }

    #[test]
    fn test_render_records() {
        use crate::models::TransactionRecord;
        use chrono::NaiveDate;

        let records = RecordSet::new(vec![
            TransactionRecord::new(7, "Laptop", 2, 999.5, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            TransactionRecord::new(9, "Cable, USB-C", 3, 0.1, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()),
        ]);

        let csv = ReportExporter::render_records(&records);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "id,sale_date,product,quantity,unit_price,revenue");
        assert_eq!(lines[1], "7,2024-03-01,Laptop,2,999.5,1999");
        assert!(lines[2].starts_with("9,2024-03-02,\"Cable, USB-C\",3,0.1,"));
        assert_eq!(lines.len(), 3);

        assert_eq!(
            ReportExporter::render_records(&RecordSet::default()),
            "id,sale_date,product,quantity,unit_price,revenue\n"
        );
    }
}
