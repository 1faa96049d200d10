use serde::Serialize;
use tracing::{debug, info};

use crate::core::aggregate::{aggregate_days, infer_target_month};
use crate::core::csv::parse_csv;
use crate::core::matrix::build_matrix;
use crate::core::stats::{all_weekly_stats, monthly_stats, Stats};
use crate::error::LoadError;
use crate::models::{CalendarMatrix, Columns, DayCell, TargetMonth};
use crate::source::CsvSource;

/// The calendar of one inferred month: the only artifact a pipeline run keeps.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthCalendar {
    pub target: TargetMonth,
    pub label: String,
    pub matrix: CalendarMatrix,
}

impl MonthCalendar {
    pub fn monthly_stats(&self) -> Stats {
        monthly_stats(&self.matrix)
    }

    pub fn weekly_stats(&self) -> Vec<Stats> {
        all_weekly_stats(&self.matrix)
    }

    pub fn select_day(&self, day: u32) -> Option<&DayCell> {
        self.matrix.day(day)
    }

    pub fn snapshot(&self) -> CalendarSnapshot<'_> {
        CalendarSnapshot {
            label: &self.label,
            year: self.target.year(),
            month: self.target.month(),
            weeks: &self.matrix,
            monthly: self.monthly_stats(),
            weekly: self.weekly_stats(),
        }
    }
}

/// Serializable view handed to a presentation layer.
#[derive(Debug, Serialize)]
pub struct CalendarSnapshot<'a> {
    pub label: &'a str,
    pub year: i32,
    pub month: u32,
    pub weeks: &'a CalendarMatrix,
    pub monthly: Stats,
    pub weekly: Vec<Stats>,
}

/// Run the whole pipeline over CSV text.
pub fn build_calendar(text: &str, columns: &Columns) -> Result<MonthCalendar, LoadError> {
    let records = parse_csv(text);
    if records.is_empty() {
        return Err(LoadError::EmptyInput);
    }
    debug!("Parsed {} CSV records", records.len());

    let target = infer_target_month(&records, columns).ok_or_else(|| LoadError::NoValidDates {
        column: columns.date.clone(),
    })?;

    let record_count = records.len();
    let aggregates = aggregate_days(records, target, columns);
    let matrix = build_matrix(aggregates, target);
    let traded_days = matrix.cells().filter(|cell| cell.has_trades).count();

    info!(
        "Built {} calendar: {} records, {} traded days, {} weeks",
        target,
        record_count,
        traded_days,
        matrix.weeks().len()
    );

    Ok(MonthCalendar {
        label: target.label(),
        target,
        matrix,
    })
}

/// Read the whole CSV payload from `source`, then build its calendar.
pub async fn load_calendar(
    source: &dyn CsvSource,
    columns: &Columns,
) -> Result<MonthCalendar, LoadError> {
    info!("Loading trades from {}", source.describe());
    let text = source.read_all().await?;
    build_calendar(&text, columns)
}
