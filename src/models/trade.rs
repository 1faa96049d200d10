use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::normalize::{amount_or_zero, parse_date};
use crate::error::FieldError;

pub const DATE_COLUMN: &str = "Activity Date";
pub const AMOUNT_COLUMN: &str = "Amount";

/// One CSV data row keyed by the header row's cells, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeRecord(IndexMap<String, String>);

impl TradeRecord {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// A repeated key keeps its first position and takes the latest value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Raw value of `column`, or `""` when the export has no such column.
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TradeRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = TradeRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Which columns carry the aggregation inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    pub date: String,
    pub amount: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            date: DATE_COLUMN.to_string(),
            amount: AMOUNT_COLUMN.to_string(),
        }
    }
}

/// A record with its date and amount normalized. A bad amount is already
/// zero-filled; a bad date is kept as an error so callers can exclude the record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTrade {
    pub date: Result<NaiveDate, FieldError>,
    pub amount: f64,
    pub raw: TradeRecord,
}

impl NormalizedTrade {
    pub fn normalize(raw: TradeRecord, columns: &Columns) -> Self {
        Self {
            date: parse_date(raw.get(&columns.date)),
            amount: amount_or_zero(raw.get(&columns.amount)),
            raw,
        }
    }

    pub fn into_detail(self) -> Option<TradeDetail> {
        let date = self.date.ok()?;
        Some(TradeDetail {
            date,
            amount: self.amount,
            record: self.raw,
        })
    }
}

/// A dated trade as shown in a day's detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDetail {
    pub date: NaiveDate,
    pub amount: f64,
    pub record: TradeRecord,
}

impl TradeDetail {
    pub fn is_win(&self) -> bool {
        self.amount > 0.0
    }
}
