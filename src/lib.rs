//! Sales analytics
//!
//! Aggregation and statistics engine for sales transactions: revenue
//! statistics, top-N product rankings and monthly breakdowns, plus the
//! loader, configuration and export plumbing used by the CLI.

pub mod analytics;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;

pub use error::{AppError, Result};
