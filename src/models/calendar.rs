use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::direction::Sentiment;
use crate::models::trade::TradeDetail;

/// Mon..Fri columns of the calendar grid.
pub const WEEKDAY_COLUMNS: usize = 5;
pub const WEEKDAY_LABELS: [&str; WEEKDAY_COLUMNS] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// The single month a calendar covers, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetMonth(NaiveDate);

impl TargetMonth {
    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self(date.with_day0(0).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Day before the first of the next month.
    pub fn days_in_month(&self) -> u32 {
        match self.0.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.0).num_days() as u32,
            None => 31, // December of the last representable year
        }
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.0.with_day(day)
    }

    /// Human-readable label, e.g. "October 2025".
    pub fn label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Accumulated trades of one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    pub total_amount: f64,
    pub trade_count: usize,
    pub win_count: usize,
    pub records: Vec<TradeDetail>,
}

impl DayAggregate {
    pub fn add(&mut self, trade: TradeDetail) {
        self.total_amount += trade.amount;
        self.trade_count += 1;
        if trade.is_win() {
            self.win_count += 1;
        }
        self.records.push(trade);
    }

    pub fn win_rate(&self) -> f64 {
        if self.trade_count > 0 {
            self.win_count as f64 / self.trade_count as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Day aggregates of one month, iterated in date order.
pub type DailyAggregates = BTreeMap<NaiveDate, DayAggregate>;

/// A real weekday of the target month, with or without trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    /// Day of month.
    pub date: u32,
    pub profit: f64,
    pub trades: usize,
    pub win_rate: f64,
    pub has_trades: bool,
    pub records: Vec<TradeDetail>,
}

impl DayCell {
    /// A weekday on which nothing was traded.
    pub fn idle(day: u32) -> Self {
        Self {
            date: day,
            profit: 0.0,
            trades: 0,
            win_rate: 0.0,
            has_trades: false,
            records: Vec::new(),
        }
    }

    pub fn from_aggregate(day: u32, aggregate: DayAggregate) -> Self {
        if aggregate.trade_count == 0 {
            return Self::idle(day);
        }
        Self {
            date: day,
            profit: aggregate.total_amount,
            trades: aggregate.trade_count,
            win_rate: aggregate.win_rate(),
            has_trades: true,
            records: aggregate.records,
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        Sentiment::of(self.profit)
    }
}

/// One Mon..Fri row; `None` is a slot that holds no day of the month.
pub type WeekRow = [Option<DayCell>; WEEKDAY_COLUMNS];

pub fn empty_week() -> WeekRow {
    std::array::from_fn(|_| None)
}

/// The weeks of one month, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarMatrix {
    weeks: Vec<WeekRow>,
}

impl CalendarMatrix {
    pub fn new(weeks: Vec<WeekRow>) -> Self {
        Self { weeks }
    }

    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// All occupied slots in grid order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|week| week.iter().flatten())
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Look up a day of the month; weekends and out-of-month days yield `None`.
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.cells().find(|cell| cell.date == day)
    }
}
