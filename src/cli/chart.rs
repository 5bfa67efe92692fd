use super::ui;
use crate::core::rates::{DateRange, RateProvider};
use crate::core::{CurrencySeries, SeriesState};
use anyhow::Result;
use comfy_table::Cell;

const TREND_WIDTH: usize = 30;

/// Renders one series as a titled table, or a warning when it has no data.
pub fn render_series(series: &CurrencySeries) -> String {
    let title = format!("{} → {}", series.base, series.target);
    let mut output = format!("{}\n\n", ui::style_text(&title, ui::StyleType::Title));

    match &series.state {
        SeriesState::Ready(monthly) => {
            let (min, max) = monthly.iter().fold((f64::MAX, f64::MIN), |(lo, hi), m| {
                (lo.min(m.average_rate), hi.max(m.average_rate))
            });

            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("year_month"),
                ui::header_cell(&series.column_name()),
                ui::header_cell("Trend"),
            ]);
            for m in monthly {
                table.add_row(vec![
                    Cell::new(m.month.to_string()),
                    ui::rate_cell(m.average_rate),
                    ui::trend_cell(m.average_rate, min, max, TREND_WIDTH),
                ]);
            }
            output.push_str(&table.to_string());
            output.push_str(&format!(
                "\n{}",
                ui::style_text(
                    &format!("{} months, min {min:.4}, max {max:.4}", monthly.len()),
                    ui::StyleType::Subtle
                )
            ));
        }
        SeriesState::Empty => {
            output.push_str(&ui::style_text(
                &format!("No data available for {title} in the selected range."),
                ui::StyleType::Warning,
            ));
        }
        SeriesState::Unavailable(reason) => {
            output.push_str(&ui::style_text(
                &format!("Could not fetch {title}: {reason}"),
                ui::StyleType::Error,
            ));
        }
    }

    output
}

pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    target_currency: &str,
    range: DateRange,
) -> Result<()> {
    let all_series = super::load_series(provider, target_currency, range).await;
    print_series(&all_series);
    Ok(())
}

pub fn print_series(all_series: &[CurrencySeries]) {
    let num_series = all_series.len();
    for (i, series) in all_series.iter().enumerate() {
        println!("{}", render_series(series));
        if i + 1 < num_series {
            ui::print_separator();
        }
    }
}
