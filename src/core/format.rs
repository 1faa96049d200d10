use crate::models::Sentiment;

fn sign(value: f64) -> &'static str {
    if value > 0.0 {
        "+"
    } else if value < 0.0 {
        "-"
    } else {
        ""
    }
}

/// Fixed-point rendering of a non-negative value that rounds exact halves up.
///
/// `{:.N}` already rounds the exact binary value correctly; only exact ties
/// need handling, since the standard formatter sends those to the even digit.
fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Exact for every value that can sit on a tie at two decimals or fewer.
    let exact = format!("{:.64}", value);
    let fraction = exact.split_once('.').map_or("", |(_, f)| f);
    let tail = fraction.get(decimals..).unwrap_or("");
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    if is_tie {
        let half_step = 0.5 * 10f64.powi(-(decimals as i32));
        format!("{:.*}", decimals, value + half_step)
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Drop trailing fractional zeros and a dangling decimal point.
fn trim_zeros(fixed: &str) -> String {
    match fixed.parse::<f64>() {
        Ok(v) if v.is_finite() => {}
        _ => return "0".to_string(),
    }
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed.to_string()
    }
}

/// Compact signed dollars: `+$1.52K`, `-$990`, `-$67.6`, `$0`.
pub fn format_currency(value: f64) -> String {
    let magnitude = value.abs();

    let body = if magnitude >= 1000.0 {
        let compact = magnitude / 1000.0;
        let decimals = if compact >= 10.0 { 0 } else { 2 };
        format!("${}K", trim_zeros(&to_fixed(compact, decimals)))
    } else if magnitude >= 100.0 {
        format!("${}", trim_zeros(&to_fixed(magnitude, 0)))
    } else if magnitude == 0.0 {
        "$0".to_string()
    } else {
        format!("${}", trim_zeros(&to_fixed(magnitude, 1)))
    };

    format!("{}{}", sign(value), body)
}

/// Signed percentage with one decimal at most: `+62.5%`, `-12.4%`, `0%`.
pub fn format_percent(value: f64) -> String {
    format!(
        "{}{}%",
        sign(value),
        trim_zeros(&to_fixed(value.abs(), 1))
    )
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

pub fn sentiment_class(value: f64) -> Sentiment {
    Sentiment::of(value)
}
