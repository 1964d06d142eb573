//! Minimal CSV reader for the score sheet.
//!
//! Quoted fields may contain commas; quotes themselves are never escaped.
//! A carriage return outside quotes ends the line.

/// Splits a single line into trimmed fields.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            '\r' if !in_quotes => break,
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Parses raw CSV text into rows of fields. Empty lines are dropped.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}
