use serde::{Deserialize, Serialize};

use crate::models::{CalendarMatrix, DayCell, Sentiment, WeekRow};

/// Net result over the traded days of a week or month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub net: f64,
    pub active_days: usize,
    pub avg: f64,
}

impl Stats {
    fn from_cells<'a>(cells: impl Iterator<Item = &'a DayCell>) -> Self {
        let (net, active_days) = cells
            .filter(|cell| cell.has_trades)
            .fold((0.0, 0usize), |(net, n), cell| (net + cell.profit, n + 1));

        Stats {
            net,
            active_days,
            avg: net / active_days.max(1) as f64,
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        Sentiment::of(self.net)
    }
}

pub fn weekly_stats(week: &WeekRow) -> Stats {
    Stats::from_cells(week.iter().flatten())
}

pub fn monthly_stats(matrix: &CalendarMatrix) -> Stats {
    Stats::from_cells(matrix.cells())
}

pub fn all_weekly_stats(matrix: &CalendarMatrix) -> Vec<Stats> {
    matrix.weeks().iter().map(weekly_stats).collect()
}
