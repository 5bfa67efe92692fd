use super::util::with_retry;
use crate::core::config::ExchangeRateProviderConfig;
use crate::core::rates::{RateProvider, RateQuery, RateRecord};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

/// Time-series client for exchangerate.host compatible endpoints.
pub struct ExchangeRateHostProvider {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
    retry_delay_ms: u64,
}

impl ExchangeRateHostProvider {
    pub fn new(config: &ExchangeRateProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxavg/0.1")
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retries: config.retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    fn timeseries_url(&self, query: &RateQuery) -> String {
        format!(
            "{}/timeseries?start_date={}&end_date={}&base={}&symbols={}",
            self.base_url,
            query.range.start(),
            query.range.end(),
            query.base,
            query.target
        )
    }

    async fn request(&self, url: &str, query: &RateQuery) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            anyhow!(
                "Request error: {} for currency pair: {}/{}",
                e,
                query.base,
                query.target
            )
        })?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}/{}",
                response.status(),
                query.base,
                query.target
            ));
        }

        Ok(response.text().await?)
    }
}

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    rates: Option<Map<String, Value>>,
}

/// Extracts `(date, rate)` pairs for `target` from a time-series body.
///
/// Entries with an unparseable date, no `target` key, or a rate that is not a
/// positive number are skipped. A body that is not JSON or has no `rates`
/// object yields no records.
fn parse_timeseries(body: &str, target: &str) -> Vec<RateRecord> {
    let response: TimeseriesResponse = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => {
            warn!(error = %e, "Malformed time-series response");
            return Vec::new();
        }
    };

    let Some(rates) = response.rates else {
        warn!("Time-series response has no rates");
        return Vec::new();
    };

    let mut records: Vec<RateRecord> = rates
        .iter()
        .filter_map(|(date_str, day)| {
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
            let rate = day.get(target).and_then(Value::as_f64)?;
            if rate.is_finite() && rate > 0.0 {
                Some(RateRecord { date, rate })
            } else {
                None
            }
        })
        .collect();

    let skipped = rates.len() - records.len();
    if skipped > 0 {
        debug!("Skipped {} entries without a usable {} rate", skipped, target);
    }

    records.sort_by_key(|r| r.date);
    records
}

#[async_trait]
impl RateProvider for ExchangeRateHostProvider {
    #[instrument(
        name = "TimeseriesFetch",
        skip(self),
        fields(query = %query)
    )]
    async fn fetch_rates(&self, query: &RateQuery) -> Result<Vec<RateRecord>> {
        let url = self.timeseries_url(query);
        debug!("Requesting time series from {}", url);

        let text = with_retry(
            || self.request(&url, query),
            self.retries,
            self.retry_delay_ms,
        )
        .await?;

        let records = parse_timeseries(&text, &query.target);
        if records.is_empty() {
            warn!("No usable rates returned for {}", query);
        } else {
            debug!("Fetched {} daily rates for {}", records.len(), query);
        }
        Ok(records)
    }
}
