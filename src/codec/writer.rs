//! Delimited-text encoding
//!
//! The inverse of decoding: one header line followed by one line per record.
//! Values that would not survive a decode verbatim (embedded commas, quote
//! characters, line breaks, or surrounding whitespace, which decode would
//! trim) are wrapped in double quotes with internal double quotes doubled.

use super::record::Document;

/// Encode a document back to delimited text.
///
/// The header is the explicit `columns` argument if given, else the
/// first-seen union of keys across all records. Columns a record lacks
/// encode as empty fields. Zero records or zero columns encode to an empty
/// string with no header line.
pub fn encode(document: &Document, columns: Option<&[String]>) -> String {
    let derived;
    let columns = match columns {
        Some(explicit) => explicit,
        None => {
            derived = document.columns();
            &derived
        }
    };
    if document.is_empty() || columns.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(document.len() + 1);
    lines.push(encode_row(columns.iter().map(String::as_str)));
    for record in document.records() {
        lines.push(encode_row(
            columns.iter().map(|column| record.get(column).unwrap_or("")),
        ));
    }
    lines.join("\n")
}

fn encode_row<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.map(encode_field).collect::<Vec<_>>().join(",")
}

fn encode_field(value: &str) -> String {
    if needs_quoting(value) {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for c in value.chars() {
            if c == '"' {
                quoted.push('"');
            }
            quoted.push(c);
        }
        quoted.push('"');
        quoted
    } else {
        value.to_string()
    }
}

// Surrounding whitespace forces quoting because decode trims unquoted
// fields; a bare single quote forces it because decode would strip a
// wrapping pair.
fn needs_quoting(value: &str) -> bool {
    value.contains([',', '"', '\'', '\n', '\r']) || value != value.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, Record};

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_basic() {
        let doc = Document::new(vec![
            record(&[("name", "John"), ("age", "25")]),
            record(&[("name", "Jane"), ("age", "30")]),
        ]);
        assert_eq!(encode(&doc, None), "name,age\nJohn,25\nJane,30");
    }

    #[test]
    fn test_encode_quotes_comma() {
        let doc = Document::new(vec![record(&[("city", "New York, NY")])]);
        assert_eq!(encode(&doc, None), "city\n\"New York, NY\"");
    }

    #[test]
    fn test_encode_doubles_internal_quotes() {
        let doc = Document::new(vec![record(&[("quote", "say \"hi\"")])]);
        assert_eq!(encode(&doc, None), "quote\n\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_encode_quotes_newline() {
        let doc = Document::new(vec![record(&[("note", "one\ntwo")])]);
        assert_eq!(encode(&doc, None), "note\n\"one\ntwo\"");
    }

    #[test]
    fn test_encode_quotes_surrounding_whitespace() {
        let doc = Document::new(vec![record(&[("a", "  padded  ")])]);
        assert_eq!(encode(&doc, None), "a\n\"  padded  \"");
    }

    #[test]
    fn test_encode_missing_column_as_empty_field() {
        let doc = Document::new(vec![
            record(&[("a", "1"), ("b", "2")]),
            record(&[("a", "3")]),
        ]);
        assert_eq!(encode(&doc, None), "a,b\n1,2\n3,");
    }

    #[test]
    fn test_encode_explicit_columns_cut() {
        let doc = Document::new(vec![
            record(&[("name", "John"), ("age", "25"), ("city", "NYC")]),
            record(&[("name", "Jane"), ("age", "30"), ("city", "LA")]),
        ]);
        let columns = vec!["city".to_string(), "name".to_string()];
        assert_eq!(encode(&doc, Some(&columns)), "city,name\nNYC,John\nLA,Jane");
    }

    #[test]
    fn test_encode_zero_records_is_empty_string() {
        let columns = vec!["a".to_string(), "b".to_string()];
        assert_eq!(encode(&Document::default(), Some(&columns)), "");
        assert_eq!(encode(&Document::default(), None), "");
    }

    #[test]
    fn test_encode_zero_columns_is_empty_string() {
        let doc = Document::new(vec![record(&[("a", "1")])]);
        assert_eq!(encode(&doc, Some(&[])), "");
    }

    #[test]
    fn test_encoded_output_redecodes() {
        let doc = Document::new(vec![record(&[
            ("name", "O'Brien, \"Pat\""),
            ("note", "  spaced  "),
        ])]);
        let redecoded = decode(&encode(&doc, None)).unwrap();
        assert_eq!(redecoded, doc);
    }
}
