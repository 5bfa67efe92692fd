//! Core business logic abstractions

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use dashboard::{CurrencySeries, SeriesState};
pub use rates::{DateRange, MergedRow, MonthlyRate, RateProvider, RateQuery, RateRecord, YearMonth};
