//! Exchange rate abstractions and core types

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Currencies charted by the dashboard, in display order.
pub const BASE_CURRENCIES: [&str; 2] = ["USD", "EUR"];

pub const DEFAULT_TARGET_CURRENCY: &str = "JPY";

/// A single daily rate returned by the upstream source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Calendar month key, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("Invalid month: {month}");
        }
        Ok(Self { year, month })
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| anyhow!("Invalid year-month: {}", s))?;
        let year = year
            .parse()
            .with_context(|| format!("Invalid year in: {s}"))?;
        let month = month
            .parse()
            .with_context(|| format!("Invalid month in: {s}"))?;
        Self::new(year, month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRate {
    pub month: YearMonth,
    pub average_rate: f64,
}

/// One row of the combined export, present only for months both series share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedRow {
    pub month: YearMonth,
    pub usd_rate: f64,
    pub eur_rate: f64,
}

/// Inclusive range of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            bail!("Invalid date range: start date {start} is after end date {end}");
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Parameters of one time-series fetch. Also the memoization key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateQuery {
    pub base: String,
    pub target: String,
    pub range: DateRange,
}

impl RateQuery {
    pub fn new(base: &str, target: &str, range: DateRange) -> Self {
        Self {
            base: base.to_uppercase(),
            target: target.to_uppercase(),
            range,
        }
    }
}

impl Display for RateQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} {}..{}",
            self.base, self.target, self.range.start, self.range.end
        )
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Returns daily rates sorted by date. An empty vector means the upstream
    /// had no usable data for the range; `Err` means it could not be reached.
    async fn fetch_rates(&self, query: &RateQuery) -> Result<Vec<RateRecord>>;
}
