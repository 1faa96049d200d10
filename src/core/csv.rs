use crate::models::TradeRecord;

/// Parse CSV text into header-keyed records.
///
/// Lines are split before fields, so a quoted field cannot span lines. Blank
/// lines are ignored and the first remaining line is the header row. Short rows
/// are padded with `""`; cells past the header count are dropped. A leading
/// byte-order mark is skipped.
pub fn parse_csv(text: &str) -> Vec<TradeRecord> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split('\n').map(str::trim).filter(|l| !l.is_empty());

    let headers = match lines.next() {
        Some(line) => split_line(line),
        None => return Vec::new(),
    };

    lines
        .map(|line| {
            let mut cells = split_line(line).into_iter();
            headers
                .iter()
                .map(|header| (header.clone(), cells.next().unwrap_or_default()))
                .collect::<TradeRecord>()
        })
        .collect()
}

/// Split one line into trimmed fields.
///
/// A `"` toggles quoted mode and `""` inside quotes is a literal quote. An
/// unterminated quote swallows the rest of the line into the current field.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
