use chrono::NaiveDate;

use crate::models::trade::{AMOUNT_COLUMN, DATE_COLUMN};
use crate::models::TradeRecord;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A record carrying only the default date and amount columns.
pub fn record(date: &str, amount: &str) -> TradeRecord {
    let mut r = TradeRecord::new();
    r.insert(DATE_COLUMN, date);
    r.insert(AMOUNT_COLUMN, amount);
    r
}

pub fn records(rows: &[(&str, &str)]) -> Vec<TradeRecord> {
    rows.iter().map(|&(d, a)| record(d, a)).collect()
}

/// Two-column CSV text, quoting amounts that contain a comma.
pub fn csv_text(rows: &[(&str, &str)]) -> String {
    let mut out = format!("{},{}\n", DATE_COLUMN, AMOUNT_COLUMN);
    for &(d, a) in rows {
        if a.contains(',') {
            out.push_str(&format!("{},\"{}\"\n", d, a));
        } else {
            out.push_str(&format!("{},{}\n", d, a));
        }
    }
    out
}

/// A month-long brokerage export: 21 of October 2025's 23 weekdays traded.
pub fn october_2025_csv() -> &'static str {
    include_str!("../tests/fixtures/october_2025.csv")
}
