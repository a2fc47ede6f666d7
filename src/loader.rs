//! Loading transaction records from JSON or YAML documents
//!
//! The loader owns row validation. Everything downstream assumes the
//! records it receives are well-formed.

use crate::error::{AppError, Result};
use crate::models::{RecordSet, TransactionRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use validator::Validate;

/// Supported input document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(InputFormat::Json),
            Some("yaml") | Some("yml") => Ok(InputFormat::Yaml),
            _ => Err(AppError::Validation(format!(
                "unsupported input file '{}', expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

/// Either a bare list of rows or `{ "sales": [...] }`.
///
/// Rows stay as format-native values so each one is decoded on its own and
/// a bad row can be reported by index.
#[derive(Deserialize)]
#[serde(untagged)]
enum SalesDocument<V> {
    Rows(Vec<V>),
    Wrapped { sales: Vec<V> },
}

impl<V> SalesDocument<V> {
    fn into_rows(self) -> Vec<V> {
        match self {
            SalesDocument::Rows(rows) | SalesDocument::Wrapped { sales: rows } => rows,
        }
    }
}

fn row_error(index: usize, err: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("row {}: {}", index, err))
}

/// Reads and validates transaction files
pub struct RecordLoader;

impl RecordLoader {
    /// Read `path` and build a record set, keeping file order
    pub async fn load(path: &Path) -> Result<RecordSet> {
        let format = InputFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path).await?;
        let records = Self::parse(&content, format)?;

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "Loaded sales records"
        );

        Ok(records)
    }

    /// Parse and validate an in-memory document
    pub fn parse(content: &str, format: InputFormat) -> Result<RecordSet> {
        let rows = match format {
            InputFormat::Json => {
                let document: SalesDocument<serde_json::Value> = serde_json::from_str(content)?;
                Self::decode_rows(document.into_rows(), serde_json::from_value)?
            }
            InputFormat::Yaml => {
                let document: SalesDocument<serde_yaml::Value> = serde_yaml::from_str(content)?;
                Self::decode_rows(document.into_rows(), serde_yaml::from_value)?
            }
        };

        Self::validate_rows(&rows)?;

        Ok(RecordSet::new(rows))
    }

    /// Decode raw rows one at a time, failing on the first that does not fit
    fn decode_rows<V, E, F>(values: Vec<V>, decode: F) -> Result<Vec<TransactionRecord>>
    where
        E: std::fmt::Display,
        F: Fn(V) -> std::result::Result<TransactionRecord, E>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| decode(value).map_err(|e| row_error(index, e)))
            .collect()
    }

    /// Reject the first malformed or duplicate row
    fn validate_rows(rows: &[TransactionRecord]) -> Result<()> {
        let mut seen_ids = HashSet::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            row.validate()
                .map_err(|e| row_error(index, format!("id {}: {}", row.id, e)))?;

            if !row.unit_price.is_finite() {
                return Err(row_error(
                    index,
                    format!("id {}: unit_price must be a finite number", row.id),
                ));
            }

            if !seen_ids.insert(row.id) {
                return Err(row_error(
                    index,
                    format!("duplicate transaction id {}", row.id),
                ));
            }
        }

        tracing::debug!(rows = rows.len(), "Validated sales rows");
        Ok(())
    }
}
