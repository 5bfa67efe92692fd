//! Loads and classifies the monthly series shown on the dashboard.
use crate::core::aggregate::{aggregate, merge};
use crate::core::rates::{DateRange, MergedRow, MonthlyRate, RateProvider, RateQuery};
use futures::future::join_all;
use tracing::{debug, warn};

/// Outcome of loading one currency's monthly series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesState {
    /// At least one month of data.
    Ready(Vec<MonthlyRate>),
    /// Upstream answered but had no usable rates for the range.
    Empty,
    /// Upstream could not be reached, timed out or returned an error status.
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct CurrencySeries {
    pub base: String,
    pub target: String,
    pub state: SeriesState,
}

impl CurrencySeries {
    pub fn monthly(&self) -> Option<&[MonthlyRate]> {
        match &self.state {
            SeriesState::Ready(monthly) => Some(monthly),
            _ => None,
        }
    }

    /// Column heading used for this series in tables and exports, e.g. `USD_to_JPY`.
    pub fn column_name(&self) -> String {
        format!("{}_to_{}", self.base, self.target)
    }
}

pub async fn load_series(
    provider: &(dyn RateProvider + Send + Sync),
    query: &RateQuery,
) -> CurrencySeries {
    let state = match provider.fetch_rates(query).await {
        Ok(records) => {
            let monthly = aggregate(&records);
            if monthly.is_empty() {
                SeriesState::Empty
            } else {
                debug!("Aggregated {} months for {}", monthly.len(), query);
                SeriesState::Ready(monthly)
            }
        }
        Err(e) => {
            warn!(error = %e, "Rates unavailable for {}", query);
            SeriesState::Unavailable(e.to_string())
        }
    };

    CurrencySeries {
        base: query.base.clone(),
        target: query.target.clone(),
        state,
    }
}

/// Loads every base currency concurrently. Output keeps the order of `bases`.
pub async fn load_all(
    provider: &(dyn RateProvider + Send + Sync),
    bases: &[&str],
    target: &str,
    range: DateRange,
    update_callback: &(dyn Fn() + Sync),
) -> Vec<CurrencySeries> {
    let futures = bases.iter().map(|base| async move {
        let query = RateQuery::new(base, target, range);
        let series = load_series(provider, &query).await;
        update_callback();
        series
    });

    join_all(futures).await
}

/// Joined rows for the export, or `None` unless both series have data.
pub fn merged_rows(usd: &CurrencySeries, eur: &CurrencySeries) -> Option<Vec<MergedRow>> {
    match (usd.monthly(), eur.monthly()) {
        (Some(usd_monthly), Some(eur_monthly)) => Some(merge(usd_monthly, eur_monthly)),
        _ => None,
    }
}
