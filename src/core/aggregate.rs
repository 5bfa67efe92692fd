//! Monthly aggregation and merging of daily rate series.
use crate::core::rates::{MergedRow, MonthlyRate, RateRecord, YearMonth};
use std::collections::BTreeMap;

/// Averages daily rates per calendar month.
///
/// Output is sorted by month and has exactly one entry for every month that
/// appears in `records`. The result does not depend on the input order.
pub fn aggregate(records: &[RateRecord]) -> Vec<MonthlyRate> {
    let mut groups: BTreeMap<YearMonth, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(YearMonth::from(record.date)).or_default();
        entry.0 += record.rate;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(month, (sum, count))| MonthlyRate {
            month,
            average_rate: sum / count as f64,
        })
        .collect()
}

/// Inner join of the two monthly series on month.
pub fn merge(usd: &[MonthlyRate], eur: &[MonthlyRate]) -> Vec<MergedRow> {
    let eur_by_month: BTreeMap<YearMonth, f64> =
        eur.iter().map(|m| (m.month, m.average_rate)).collect();

    let mut rows: Vec<MergedRow> = usd
        .iter()
        .filter_map(|u| {
            eur_by_month.get(&u.month).map(|eur_rate| MergedRow {
                month: u.month,
                usd_rate: u.average_rate,
                eur_rate: *eur_rate,
            })
        })
        .collect();
    rows.sort_by_key(|r| r.month);
    rows.dedup_by_key(|r| r.month);
    rows
}
