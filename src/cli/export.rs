use super::ui;
use crate::core::export::{XLSX_MIME, build_export};
use crate::core::rates::{DateRange, RateProvider};
use crate::core::CurrencySeries;
use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tracing::{debug, warn};

/// Writes the combined workbook for `usd` and `eur` to `output`.
///
/// Returns `false` without touching the filesystem when either series has no
/// data.
pub fn write_export(usd: &CurrencySeries, eur: &CurrencySeries, output: &Path) -> Result<bool> {
    let Some(bytes) = build_export(usd, eur)? else {
        return Ok(false);
    };

    std::fs::write(output, &bytes)
        .with_context(|| format!("Failed to write export to {}", output.display()))?;
    debug!(
        "Wrote {} bytes ({}) to {}",
        bytes.len(),
        XLSX_MIME,
        output.display()
    );
    Ok(true)
}

pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    target_currency: &str,
    range: DateRange,
    output: &Path,
) -> Result<()> {
    let all_series = super::load_series(provider, target_currency, range).await;
    export_series(&all_series, output)
}

/// Writes the export for already loaded series, or prints why it was skipped.
pub fn export_series(all_series: &[CurrencySeries], output: &Path) -> Result<()> {
    let [usd, eur] = all_series else {
        return Err(anyhow!(
            "Expected two currency series, got {}",
            all_series.len()
        ));
    };

    if write_export(usd, eur, output)? {
        println!(
            "{} {}",
            ui::style_text("Exported", ui::StyleType::Success),
            output.display()
        );
    } else {
        let missing: Vec<String> = [usd, eur]
            .iter()
            .filter(|s| s.monthly().is_none())
            .map(|s| format!("{} → {}", s.base, s.target))
            .collect();
        warn!("Export skipped, no data for {}", missing.join(", "));
        println!(
            "{}",
            ui::style_text(
                &format!("Export skipped: no data for {}", missing.join(", ")),
                ui::StyleType::Warning
            )
        );
    }

    Ok(())
}
