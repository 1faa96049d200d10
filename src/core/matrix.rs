use chrono::{Datelike, Weekday};
use tracing::debug;

use crate::models::calendar::empty_week;
use crate::models::{
    CalendarMatrix, DailyAggregates, DayCell, TargetMonth, WeekRow, WEEKDAY_COLUMNS,
};

/// Number of days in `month` (1-based) of `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    TargetMonth::new(year, month).map(|m| m.days_in_month())
}

/// Number of Monday–Friday days in the month.
pub fn weekday_count(target: TargetMonth) -> usize {
    (1..=target.days_in_month())
        .filter_map(|d| target.day(d))
        .filter(|date| is_weekday(date.weekday()))
        .count()
}

fn is_weekday(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Lay the month's weekdays onto a Mon–Fri grid.
///
/// The first week is left-padded up to the month's first weekday, and the last
/// week is right-padded with empty slots. Every weekday gets a cell, traded or
/// not. Aggregates are consumed: their records move into the cells.
pub fn build_matrix(mut aggregates: DailyAggregates, target: TargetMonth) -> CalendarMatrix {
    let days = target.days_in_month();

    let first_weekday = (1..=days)
        .filter_map(|d| target.day(d))
        .find(|date| is_weekday(date.weekday()));
    let Some(first_weekday) = first_weekday else {
        return CalendarMatrix::default();
    };

    let mut weeks: Vec<WeekRow> = Vec::new();
    let mut week = empty_week();
    let mut slot = first_weekday.weekday().num_days_from_monday() as usize;

    for date in (1..=days).filter_map(|d| target.day(d)) {
        if !is_weekday(date.weekday()) {
            continue;
        }

        week[slot] = Some(match aggregates.remove(&date) {
            Some(aggregate) => DayCell::from_aggregate(date.day(), aggregate),
            None => DayCell::idle(date.day()),
        });
        slot += 1;

        if slot == WEEKDAY_COLUMNS {
            weeks.push(std::mem::replace(&mut week, empty_week()));
            slot = 0;
        }
    }

    if slot > 0 {
        weeks.push(week);
    }

    if !aggregates.is_empty() {
        debug!(
            "{} weekend day(s) with trades left off the {} grid",
            aggregates.len(),
            target
        );
    }

    CalendarMatrix::new(weeks)
}
