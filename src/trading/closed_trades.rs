use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::csv::parse_csv;
use crate::core::normalize::{amount_or_zero, parse_price, parse_quantity};
use crate::models::{Columns, Direction, TradeRecord};

const OPEN_CODES: &[&str] = &["BTO", "STO"];
const CLOSE_CODES: &[&str] = &["STC", "BTC"];

/// One brokerage activity row with its numeric fields normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,
    pub instrument: String,
    pub activity_date: String,
    pub process_date: String,
    pub settle_date: String,
    pub trans_code: String,
    pub quantity: f64,
    pub price: f64,
    pub amount: f64,
}

impl Transaction {
    /// Read a row, taking the date and amount from the configured columns.
    pub fn from_record(record: &TradeRecord, columns: &Columns) -> Self {
        Self {
            description: record.get("Description").to_string(),
            instrument: record.get("Instrument").to_string(),
            activity_date: record.get(&columns.date).to_string(),
            process_date: record.get("Process Date").to_string(),
            settle_date: record.get("Settle Date").to_string(),
            trans_code: record.get("Trans Code").to_string(),
            quantity: parse_quantity(record.get("Quantity")),
            price: parse_price(record.get("Price")),
            amount: amount_or_zero(record.get(&columns.amount)),
        }
    }

    pub fn is_open(&self) -> bool {
        OPEN_CODES.contains(&self.trans_code.as_str())
    }

    pub fn is_close(&self) -> bool {
        CLOSE_CODES.contains(&self.trans_code.as_str())
    }

    /// Buying to open is long; selling to open is short.
    pub fn direction(&self) -> Direction {
        if self.trans_code == "BTO" {
            Direction::Long
        } else {
            Direction::Short
        }
    }
}

pub fn transactions_from_csv(text: &str, columns: &Columns) -> Vec<Transaction> {
    parse_csv(text)
        .iter()
        .map(|record| Transaction::from_record(record, columns))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub open: Transaction,
    pub close: Transaction,
}

impl ClosedTrade {
    /// Opening debit/credit plus closing credit/debit.
    pub fn profit(&self) -> f64 {
        self.open.amount + self.close.amount
    }

    pub fn direction(&self) -> Direction {
        self.open.direction()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClosedTradeReport {
    pub closed: Vec<ClosedTrade>,
    /// Opens never matched by a close, by description in first-seen order.
    pub open_positions: IndexMap<String, VecDeque<Transaction>>,
}

impl ClosedTradeReport {
    pub fn total_profit(&self) -> f64 {
        self.closed.iter().map(ClosedTrade::profit).sum()
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &Transaction> {
        self.open_positions.values().flatten()
    }
}

/// Pair each close with the oldest open of the same description.
///
/// Closes without a prior open and rows with other codes are ignored.
pub fn pair_closed_trades<I>(transactions: I) -> ClosedTradeReport
where
    I: IntoIterator<Item = Transaction>,
{
    let mut open_positions: IndexMap<String, VecDeque<Transaction>> = IndexMap::new();
    let mut closed = Vec::new();

    for txn in transactions {
        if txn.is_open() {
            open_positions
                .entry(txn.description.clone())
                .or_default()
                .push_back(txn);
        } else if txn.is_close() {
            let opening = open_positions
                .get_mut(&txn.description)
                .and_then(VecDeque::pop_front);
            if let Some(open) = opening {
                closed.push(ClosedTrade { open, close: txn });
            }
        }
    }

    open_positions.retain(|_, queue| !queue.is_empty());

    ClosedTradeReport {
        closed,
        open_positions,
    }
}
