use std::fmt;

use crate::core::format::{format_currency, format_percent, pluralize, sentiment_class};
use crate::core::pipeline::MonthCalendar;
use crate::models::{DayCell, TargetMonth, WEEKDAY_LABELS};
use crate::trading::closed_trades::ClosedTradeReport;

const CELL_WIDTH: usize = 16;
const RULE_WIDTH: usize = CELL_WIDTH * WEEKDAY_LABELS.len();

/// Plain-text month view: header, weekday grid and weekly panel.
pub struct CalendarReport<'a> {
    calendar: &'a MonthCalendar,
}

impl<'a> CalendarReport<'a> {
    pub fn new(calendar: &'a MonthCalendar) -> Self {
        Self { calendar }
    }
}

fn cell_lines(slot: &Option<DayCell>) -> [String; 4] {
    match slot {
        None => ["No data".to_string(), String::new(), String::new(), String::new()],
        Some(cell) if !cell.has_trades => [
            cell.date.to_string(),
            "No trades".to_string(),
            String::new(),
            String::new(),
        ],
        Some(cell) => [
            cell.date.to_string(),
            format_currency(cell.profit),
            format!("{} {}", cell.trades, pluralize("trade", cell.trades)),
            format!("{} win rate", format_percent(cell.win_rate)),
        ],
    }
}

impl fmt::Display for CalendarReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cal = self.calendar;
        let monthly = cal.monthly_stats();

        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(
            f,
            "  {}    Monthly stats: {} • {} {}",
            cal.label,
            format_currency(monthly.net),
            monthly.active_days,
            pluralize("day", monthly.active_days)
        )?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;

        for label in WEEKDAY_LABELS {
            write!(f, "{:<width$}", label, width = CELL_WIDTH)?;
        }
        writeln!(f)?;

        for week in cal.matrix.weeks() {
            writeln!(f, "{}", "─".repeat(RULE_WIDTH))?;
            let cells: Vec<[String; 4]> = week.iter().map(cell_lines).collect();
            for line in 0..4 {
                let row: String = cells
                    .iter()
                    .map(|c| format!("{:<width$}", c[line], width = CELL_WIDTH))
                    .collect();
                writeln!(f, "{}", row.trim_end())?;
            }
        }
        writeln!(f, "{}", "─".repeat(RULE_WIDTH))?;

        writeln!(f)?;
        writeln!(f, "  Monthly net   {}", format_currency(monthly.net))?;
        writeln!(
            f,
            "  {} active {} • Avg {}",
            monthly.active_days,
            pluralize("day", monthly.active_days),
            format_currency(monthly.avg)
        )?;
        writeln!(f, "  ───────────────────────────────────")?;
        for (i, week) in cal.weekly_stats().iter().enumerate() {
            writeln!(
                f,
                "  Week {}  {:>2} {:<5} {:>9}  {}",
                i + 1,
                week.active_days,
                pluralize("day", week.active_days),
                format_currency(week.net),
                sentiment_class(week.net)
            )?;
        }

        Ok(())
    }
}

/// Trade list of one selected day.
pub struct DayDetail<'a> {
    target: TargetMonth,
    cell: &'a DayCell,
}

impl<'a> DayDetail<'a> {
    pub fn new(target: TargetMonth, cell: &'a DayCell) -> Self {
        Self { target, cell }
    }
}

impl fmt::Display for DayDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell;
        match self.target.day(cell.date) {
            Some(date) => writeln!(f, "  {}", date.format("%A, %B %-d, %Y"))?,
            None => writeln!(f, "  Day {}", cell.date)?,
        }

        if !cell.has_trades {
            return writeln!(f, "  No trades");
        }

        writeln!(
            f,
            "  {} • {} {} • {} win rate",
            format_currency(cell.profit),
            cell.trades,
            pluralize("trade", cell.trades),
            format_percent(cell.win_rate)
        )?;
        writeln!(f, "  ───────────────────────────────────")?;
        for trade in &cell.records {
            let r = &trade.record;
            writeln!(
                f,
                "  {:<6} {:<5} {:>4} @ {:<8} {:>9}  {}",
                r.get("Instrument"),
                r.get("Trans Code"),
                r.get("Quantity"),
                r.get("Price"),
                format_currency(trade.amount),
                r.get("Description")
            )?;
        }

        Ok(())
    }
}

/// Closed-trade profitability listing.
pub struct ClosedTradesSummary<'a> {
    report: &'a ClosedTradeReport,
}

impl<'a> ClosedTradesSummary<'a> {
    pub fn new(report: &'a ClosedTradeReport) -> Self {
        Self { report }
    }
}

impl fmt::Display for ClosedTradesSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        if report.closed.is_empty() {
            return writeln!(f, "No closed trades were found in the CSV file.");
        }

        writeln!(f, "Closed trades and profitability:")?;
        writeln!(f)?;
        for trade in &report.closed {
            writeln!(f, "{} ({})", trade.open.description, trade.direction())?;
            writeln!(
                f,
                "  Opened: {} @ ${:.2} ({:+.2})",
                trade.open.activity_date, trade.open.price, trade.open.amount
            )?;
            writeln!(
                f,
                "  Closed: {} @ ${:.2} ({:+.2})",
                trade.close.activity_date, trade.close.price, trade.close.amount
            )?;
            writeln!(f, "  Profit: {:+.2}", trade.profit())?;
            writeln!(f)?;
        }
        writeln!(
            f,
            "Total profit across closed trades: {:+.2}",
            report.total_profit()
        )?;

        if !report.open_positions.is_empty() {
            writeln!(f)?;
            writeln!(f, "Open positions that were not matched with a closing trade:")?;
            for (desc, entries) in &report.open_positions {
                for txn in entries {
                    writeln!(
                        f,
                        "  {} ({}) opened {} @ ${:.2} ({:+.2})",
                        desc,
                        txn.direction(),
                        txn.activity_date,
                        txn.price,
                        txn.amount
                    )?;
                }
            }
        }

        Ok(())
    }
}
