//! Shared fixtures for the analytics integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use sales_analytics::models::{RecordSet, TransactionRecord};

pub const PRODUCTS: [(&str, f64, f64); 6] = [
    ("Laptop", 800.0, 1200.0),
    ("Mouse", 15.0, 50.0),
    ("Keyboard", 30.0, 100.0),
    ("Monitor", 150.0, 400.0),
    ("Headphones", 25.0, 150.0),
    ("USB Cable", 5.0, 20.0),
];

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn record(id: u64, product: &str, quantity: u32, unit_price: f64, sale_date: &str) -> TransactionRecord {
    TransactionRecord::new(id, product, quantity, unit_price, date(sale_date))
}

/// The three-sale scenario: two laptops in January and February, mice in January
pub fn scenario_records() -> RecordSet {
    RecordSet::new(vec![
        record(1, "Laptop", 2, 1000.0, "2024-01-05"),
        record(2, "Laptop", 1, 1000.0, "2024-02-10"),
        record(3, "Mouse", 5, 20.0, "2024-01-20"),
    ])
}

/// Deterministic pseudo-random sales spread over a year
pub fn synthetic_records(count: usize, seed: u64) -> RecordSet {
    let mut state = seed.max(1);
    let mut next = move || {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let start = date("2024-01-01");
    (0..count)
        .map(|i| {
            let (product, min_price, max_price) = PRODUCTS[(next() % PRODUCTS.len() as u64) as usize];
            let quantity = (next() % 10) as u32 + 1;
            let cents = (next() % 10_000) as f64 / 10_000.0;
            let unit_price = ((min_price + (max_price - min_price) * cents) * 100.0).round() / 100.0;
            let sale_date = start + chrono::Duration::days((next() % 366) as i64);

            TransactionRecord::new(i as u64 + 1, product, quantity, unit_price, sale_date)
        })
        .collect()
}
