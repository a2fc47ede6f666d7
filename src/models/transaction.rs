use crate::models::period::YearMonth;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single sale event
///
/// Records are immutable once loaded. Revenue is always derived from
/// `quantity * unit_price` and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TransactionRecord {
    /// Unique, stable identifier
    pub id: u64,

    /// Product name
    #[validate(length(min = 1, max = 255))]
    pub product: String,

    /// Units sold
    #[validate(range(min = 1))]
    pub quantity: u32,

    /// Price per unit
    #[serde(alias = "price")]
    #[validate(range(min = 0.0))]
    pub unit_price: f64,

    /// Calendar date of the sale (no time zone)
    pub sale_date: NaiveDate,
}

impl TransactionRecord {
    pub fn new(
        id: u64,
        product: impl Into<String>,
        quantity: u32,
        unit_price: f64,
        sale_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            product: product.into(),
            quantity,
            unit_price,
            sale_date,
        }
    }

    /// Revenue of this sale
    pub fn revenue(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }

    /// Calendar month the sale falls in
    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(self.sale_date)
    }
}
