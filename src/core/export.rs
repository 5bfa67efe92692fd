//! Spreadsheet export of the merged monthly series.
use crate::core::dashboard::{CurrencySeries, merged_rows};
use crate::core::rates::MergedRow;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

pub const EXPORT_FILE_NAME: &str = "fx_monthly_avg.xlsx";

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const MONTH_COLUMN: &str = "year_month";

/// Writes `rows` to an in-memory workbook with columns
/// `year_month`, `usd_column`, `eur_column`.
pub fn to_xlsx(rows: &[MergedRow], usd_column: &str, eur_column: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let rate_format = Format::new().set_num_format("0.0000");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("monthly_avg")?;

    for (col, header) in [MONTH_COLUMN, usd_column, eur_column].iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row.month.to_string())?;
        worksheet.write_number_with_format(r, 1, row.usd_rate, &rate_format)?;
        worksheet.write_number_with_format(r, 2, row.eur_rate, &rate_format)?;
    }
    worksheet.set_column_width(0, 12.0)?;
    worksheet.set_column_width(1, 14.0)?;
    worksheet.set_column_width(2, 14.0)?;

    let buffer = workbook
        .save_to_buffer()
        .context("Failed to serialize workbook")?;
    debug!("Serialized {} rows into {} bytes", rows.len(), buffer.len());
    Ok(buffer)
}

/// The export bytes, or `None` when either series has no data.
pub fn build_export(usd: &CurrencySeries, eur: &CurrencySeries) -> Result<Option<Vec<u8>>> {
    match merged_rows(usd, eur) {
        Some(rows) => to_xlsx(&rows, &usd.column_name(), &eur.column_name()).map(Some),
        None => Ok(None),
    }
}
