use tracing::debug;

use crate::core::normalize::parse_date;
use crate::models::{Columns, DailyAggregates, NormalizedTrade, TargetMonth, TradeRecord};

/// Month of the earliest valid activity date, or `None` when no record has one.
pub fn infer_target_month(records: &[TradeRecord], columns: &Columns) -> Option<TargetMonth> {
    records
        .iter()
        .filter_map(|r| parse_date(r.get(&columns.date)).ok())
        .min()
        .map(TargetMonth::of)
}

/// Group the records of `target` by activity date.
///
/// Records with an invalid date, or a date in another month, are left out.
/// Records with an invalid amount still count as a trade worth zero.
pub fn aggregate_days<I>(records: I, target: TargetMonth, columns: &Columns) -> DailyAggregates
where
    I: IntoIterator<Item = TradeRecord>,
{
    let mut days = DailyAggregates::new();
    let mut undated = 0usize;
    let mut other_month = 0usize;

    for record in records {
        let trade = NormalizedTrade::normalize(record, columns);
        match trade.date {
            Err(_) => undated += 1,
            Ok(date) if !target.contains(date) => other_month += 1,
            Ok(_) => {
                if let Some(detail) = trade.into_detail() {
                    days.entry(detail.date).or_default().add(detail);
                }
            }
        }
    }

    if undated > 0 || other_month > 0 {
        debug!(
            "Skipped {} undated and {} out-of-month records for {}",
            undated, other_month, target
        );
    }

    days
}
