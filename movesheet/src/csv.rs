//! Header-keyed CSV parsing.
//!
//! Single left-to-right scan with one character of lookahead. Quotes escape
//! by doubling, `\r\n`, `\n` and `\r` all end a row, and rows with nothing
//! but whitespace are skipped wherever they appear.

use serde::{Deserialize, Serialize};

/// One data row keyed by header name, in header order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. A repeated key keeps its first position and
    /// takes the newest value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Splits `text` into rows of raw (untrimmed) cells.
///
/// Blank rows are already dropped; quoting is resolved.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => row.push(std::mem::take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                push_row(&mut rows, std::mem::take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    row.push(field);
    push_row(&mut rows, row);
    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.iter().any(|cell| !cell.trim().is_empty()) {
        rows.push(row);
    }
}

/// Parses CSV text into records keyed by the first retained row.
///
/// Short rows are padded with empty values, cells past the header width are
/// dropped. No rows at all yields an empty vec.
pub fn parse(text: &str) -> Vec<Record> {
    let mut rows = parse_rows(text).into_iter();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect();

    rows.map(|row| {
        headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = row.get(idx).map(|cell| cell.trim()).unwrap_or("");
                (header.clone(), value.to_string())
            })
            .collect()
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn quote(cell: &str) -> String {
        format!("\"{}\"", cell.replace('"', "\"\""))
    }

    #[test]
    fn quoted_comma_stays_in_one_cell() {
        let records = parse("Attack,Type\nBlizzard,\"Ice, Fire\"\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Type"), Some("Ice, Fire"));
    }

    #[test]
    fn quotes_toggle_mid_field() {
        assert_eq!(parse_rows("a\"b,c\"d,e"), vec![vec!["ab,cd", "e"]]);
    }

    #[test]
    fn doubled_quote_is_literal() {
        let records = parse("Attack,Description\nShout,\"Say \"\"hi\"\"\"");
        assert_eq!(records[0].get("Description"), Some("Say \"hi\""));
    }

    #[test]
    fn quoted_newline_stays_in_cell() {
        let rows = parse_rows("a,\"line one\nline two\"\r\nb,c");
        assert_eq!(
            rows,
            cells(&[&["a", "line one\nline two"], &["b", "c"]])
        );
    }

    #[test]
    fn line_endings_are_interchangeable() {
        let lf = parse_rows("a,b\n1,2\n3,4");
        let crlf = parse_rows("a,b\r\n1,2\r\n3,4\r\n");
        let cr = parse_rows("a,b\r1,2\r3,4\r");
        assert_eq!(lf, crlf);
        assert_eq!(lf, cr);
        assert_eq!(lf.len(), 3);
    }

    #[test]
    fn blank_lines_are_skipped_anywhere() {
        let text = "\n\nAttack,Type\n\n   \n,,\nFireball,Fire\n\n\nTackle,Normal\n \t \n";
        let records = parse(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Attack"), Some("Fireball"));
        assert_eq!(records[0].get("Type"), Some("Fire"));
        assert_eq!(records[1].get("Attack"), Some("Tackle"));
        assert_eq!(records[1].get("Type"), Some("Normal"));
    }

    #[test]
    fn trailing_field_without_newline_is_kept() {
        let rows = parse_rows("a,b\n1,2");
        assert_eq!(rows, cells(&[&["a", "b"], &["1", "2"]]));
    }

    #[test]
    fn short_rows_pad_and_long_rows_truncate() {
        let records = parse("A,B,C\n1\n1,2,3,4,5\n");
        assert_eq!(
            records[0].iter().collect::<Vec<_>>(),
            vec![("A", "1"), ("B", ""), ("C", "")]
        );
        assert_eq!(
            records[1].iter().collect::<Vec<_>>(),
            vec![("A", "1"), ("B", "2"), ("C", "3")]
        );
    }

    #[test]
    fn headers_and_values_are_trimmed() {
        let records = parse("  Attack , Casting Time \n  Ember ,  1 action  ");
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["Attack", "Casting Time"]);
        assert_eq!(records[0].get("Casting Time"), Some("1 action"));
    }

    #[test]
    fn header_only_and_empty_inputs_yield_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("\r\n\n  \n").is_empty());
        assert!(parse("Attack,Type\n").is_empty());
    }

    #[test]
    fn clean_input_matches_naive_split() {
        let text = "Attack,Type,Level\nEmber,Fire,Lv. 1\nGust,Flying,Cantrip\nTackle,Normal,-";
        let naive: Vec<Vec<String>> = text
            .split('\n')
            .map(|line| line.split(',').map(str::to_string).collect())
            .collect();
        assert_eq!(parse_rows(text), naive);
    }

    #[test]
    fn quoted_cells_round_trip() {
        let original = vec![
            vec!["plain".to_string(), "with, comma".to_string()],
            vec!["say \"hi\"".to_string(), "multi\nline".to_string()],
            vec!["\"\"".to_string(), "end".to_string()],
        ];
        let text = original
            .iter()
            .map(|row| row.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join("\r\n");
        assert_eq!(parse_rows(&text), original);
    }

    #[test]
    fn repeated_header_keeps_position_and_last_value() {
        let records = parse("Name,Type,Name\nfirst,Fire,second");
        assert_eq!(
            records[0].iter().collect::<Vec<_>>(),
            vec![("Name", "second"), ("Type", "Fire")]
        );
    }
}
