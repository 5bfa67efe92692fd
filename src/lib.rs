pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::rates::{DateRange, RateQuery, RateRecord};
use crate::providers::caching::CachingRateProvider;
use crate::providers::exchangerate_host::ExchangeRateHostProvider;
use crate::store::MemoryCache;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Chart,
    Export { output: PathBuf },
    Report { output: PathBuf },
}

/// Date range requested on the command line. Missing bounds fall back to the
/// configured start date and today.
#[derive(Debug, Default, Clone, Copy)]
pub struct RangeOptions {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    options: RangeOptions,
) -> Result<()> {
    info!("fxavg starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let start = options.start.unwrap_or_else(|| config.default_start_date());
    let end = options.end.unwrap_or_else(|| Local::now().date_naive());
    let range = DateRange::new(start, end)?;

    // Session-scoped memoization shared by every step of this command
    let cache = Arc::new(MemoryCache::<RateQuery, Vec<RateRecord>>::new());
    let upstream = ExchangeRateHostProvider::new(&config.exchangerate())?;
    let provider = CachingRateProvider::new(upstream, cache, config.cache_ttl());
    let target_currency = config.target_currency.to_uppercase();

    match command {
        AppCommand::Chart => cli::chart::run(&provider, &target_currency, range).await,
        AppCommand::Export { output } => {
            cli::export::run(&provider, &target_currency, range, &output).await
        }
        AppCommand::Report { output } => {
            // One load feeds both steps so the export matches what was charted
            let all_series = cli::load_series(&provider, &target_currency, range).await;
            cli::chart::print_series(&all_series);
            cli::ui::print_separator();
            cli::export::export_series(&all_series, &output)
        }
    }
}
