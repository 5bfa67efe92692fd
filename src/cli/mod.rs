pub mod chart;
pub mod export;
pub mod setup;
pub mod ui;

use crate::core::dashboard::load_all;
use crate::core::rates::{BASE_CURRENCIES, DateRange, RateProvider};
use crate::core::CurrencySeries;

/// Fetches every base currency behind a progress bar.
pub async fn load_series(
    provider: &(dyn RateProvider + Send + Sync),
    target_currency: &str,
    range: DateRange,
) -> Vec<CurrencySeries> {
    let pb = ui::new_progress_bar(BASE_CURRENCIES.len() as u64, true);
    pb.set_message("Fetching rates...");

    let series = load_all(provider, &BASE_CURRENCIES, target_currency, range, &|| pb.inc(1)).await;
    pb.finish_and_clear();
    series
}
