//! Delimited-text parsing for the exported data files
//!
//! RFC-4180-like: comma separators, double-quote delimited fields with
//! doubled-quote escapes, `\n` / `\r\n` / bare `\r` record terminators
//! outside quotes. The first record is the header row and keys all
//! subsequent records by position.

use std::collections::HashMap;

/// A parsed data row, keyed by trimmed header name
pub type Record = HashMap<String, String>;

/// Parse raw CSV text into header-keyed records
///
/// Rows whose cells are all empty are dropped (blank lines, including a
/// trailing one). Data rows shorter than the header pad missing trailing
/// fields with `""`. Both keys and values are trimmed. Empty input yields
/// an empty sequence.
pub fn parse(text: &str) -> Vec<Record> {
    let rows = parse_rows(text);
    if rows.is_empty() {
        return Vec::new();
    }

    let headers: Vec<String> = rows[0].iter().map(|h| h.trim().to_string()).collect();
    rows[1..]
        .iter()
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = cells.get(idx).map(|c| c.trim()).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect()
        })
        .collect()
}

/// Parse raw CSV text into rows of untrimmed cells
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                cell.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
            continue;
        }

        if !in_quotes && ch == ',' {
            row.push(std::mem::take(&mut cell));
            continue;
        }

        if !in_quotes && (ch == '\n' || ch == '\r') {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            row.push(std::mem::take(&mut cell));
            if row.iter().any(|c| !c.is_empty()) {
                rows.push(std::mem::take(&mut row));
            } else {
                row.clear();
            }
            continue;
        }

        cell.push(ch);
    }

    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        if row.iter().any(|c| !c.is_empty()) {
            rows.push(row);
        }
    }

    rows
}

/// Serialize records back to CSV text under the given header order
///
/// Fields containing commas, quotes, or line breaks are quoted with doubled
/// internal quotes, so `parse(write(h, r))` reproduces the field values.
pub fn write(headers: &[String], records: &[Record]) -> String {
    let mut out = String::new();
    write_row(&mut out, headers.iter().map(|h| h.as_str()));
    for record in records {
        write_row(
            &mut out,
            headers
                .iter()
                .map(|h| record.get(h).map(|v| v.as_str()).unwrap_or("")),
        );
    }
    out
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            out.push(',');
        }
        if cell.contains(['"', ',', '\n', '\r']) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_basic() {
        let records = parse("a,b,c\n1,2,3\n4,5,6\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["a"], "1");
        assert_eq!(records[1]["c"], "6");
    }

    #[test]
    fn test_parse_quoted_fields() {
        let records = parse("name,note\n\"Tyler, The Creator\",\"said \"\"hi\"\"\"\n");
        assert_eq!(records[0]["name"], "Tyler, The Creator");
        assert_eq!(records[0]["note"], "said \"hi\"");
    }

    #[test]
    fn test_parse_embedded_newline() {
        let records = parse("a,b\n\"line one\nline two\",x\n");
        assert_eq!(records[0]["a"], "line one\nline two");
        assert_eq!(records[0]["b"], "x");
    }

    #[test]
    fn test_parse_crlf_and_bare_cr() {
        let records = parse("a,b\r\n1,2\r3,4\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["b"], "2");
        assert_eq!(records[1]["a"], "3");
    }

    #[test]
    fn test_blank_rows_dropped() {
        let records = parse("a,b\n,\n1,2\n\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["a"], "1");
    }

    #[test]
    fn test_short_rows_pad_with_empty() {
        let records = parse("a,b,c\n1\n");
        assert_eq!(records[0]["a"], "1");
        assert_eq!(records[0]["b"], "");
        assert_eq!(records[0]["c"], "");
    }

    #[test]
    fn test_headers_and_values_trimmed() {
        let records = parse(" a , b \n 1 , 2 \n");
        assert_eq!(records[0]["a"], "1");
        assert_eq!(records[0]["b"], "2");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }

    #[test]
    fn test_round_trip_preserves_awkward_fields() {
        let headers = vec!["artist".to_string(), "note".to_string()];
        let records = vec![
            record(&[("artist", "AC/DC"), ("note", "plain")]),
            record(&[("artist", "Tyler, The Creator"), ("note", "a \"quoted\" word")]),
            record(&[("artist", "multi\nline"), ("note", "trailing,comma,")]),
        ];
        let text = write(&headers, &records);
        let reparsed = parse(&text);
        assert_eq!(reparsed, records);
    }
}
