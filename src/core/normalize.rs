use chrono::{Days, NaiveDate};

use crate::error::FieldError;

/// Parse an `M/D/YY` or `M/D/YYYY` activity date.
///
/// Month and day are not range-checked: out-of-range values roll over into the
/// neighbouring month or year (`13/1/25` is January 1st, 2026; `10/0/25` is
/// September 30th), matching how brokerage exports have always been read.
pub fn parse_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Empty);
    }

    let parts: Vec<&str> = raw.split('/').map(str::trim).collect();
    let [month, day, year] = parts.as_slice() else {
        return Err(FieldError::Shape);
    };

    let month = parse_component(month)?;
    let day = parse_component(day)?;
    let year = if year.len() == 2 {
        parse_component(year)? + 2000
    } else {
        parse_component(year)?
    };

    resolve_date(year, month, day)
}

fn parse_component(part: &str) -> Result<i64, FieldError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::NotNumeric);
    }
    part.parse::<u32>()
        .map(i64::from)
        .map_err(|_| FieldError::OutOfRange)
}

/// Build a date from unchecked components, carrying overflow forward.
fn resolve_date(year: i64, month: i64, day: i64) -> Result<NaiveDate, FieldError> {
    let month_index = year * 12 + (month - 1);
    let year = i32::try_from(month_index.div_euclid(12)).map_err(|_| FieldError::OutOfRange)?;
    let month = month_index.rem_euclid(12) as u32 + 1;

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(FieldError::OutOfRange)?;
    let date = if day == 0 {
        first.pred_opt()
    } else {
        first.checked_add_days(Days::new(day as u64 - 1))
    };
    date.ok_or(FieldError::OutOfRange)
}

/// Parse a currency amount such as `$1,234.56` or `($1,234.56)`.
pub fn parse_amount(raw: &str) -> Result<f64, FieldError> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();

    let (negative, digits) = match cleaned.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner.trim()),
        None => (false, cleaned),
    };
    if digits.is_empty() {
        return Err(FieldError::Empty);
    }

    let value: f64 = digits.parse().map_err(|_| FieldError::NotNumeric)?;
    if !value.is_finite() {
        return Err(FieldError::NotNumeric);
    }

    Ok(if negative { -value } else { value })
}

/// Amount with unparseable input counted as zero.
pub fn amount_or_zero(raw: &str) -> f64 {
    parse_amount(raw).unwrap_or(0.0)
}

/// Unit price; prices carry no sign, so accounting parentheses are ignored.
pub fn parse_price(raw: &str) -> f64 {
    amount_or_zero(raw).abs()
}

/// Contract or share count. Short lots are exported with a trailing `S`.
pub fn parse_quantity(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix('S').unwrap_or(trimmed);
    digits
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite())
        .unwrap_or(0.0)
}
