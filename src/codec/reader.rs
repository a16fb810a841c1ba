//! Delimited-text decoding
//!
//! One pass over the source characters splits it into rows along unquoted
//! newlines, and each row into fields along unquoted commas. The first
//! non-blank row is the mandatory header; every later row is shaped to the
//! header's width (short rows pad with empty strings, long rows drop the
//! extra fields).
//!
//! Field syntax:
//! - a field may be wrapped in `'` or `"`; a doubled quote character inside
//!   a quoted field is one literal quote
//! - newlines inside a quoted field are literal content
//! - unquoted values are trimmed of surrounding whitespace, quoted values
//!   are preserved verbatim
//!
//! Decoding is all-or-nothing: an unterminated quote or stray text after a
//! closing quote fails the whole call with a [`DecodeError`].

use super::errors::{DecodeError, DecodeResult};
use super::record::{Document, Record};

/// Decode delimited text into a [`Document`].
///
/// Empty input, or input containing only a header line, decodes to a
/// zero-record document. Blank and whitespace-only lines are skipped and
/// never produce empty records. Duplicate header names collapse onto one
/// key with the last value winning.
pub fn decode(text: &str) -> DecodeResult<Document> {
    let mut rows = split_rows(text)?.into_iter();

    let header = match rows.next() {
        Some(header) => header,
        None => return Ok(Document::default()),
    };

    let mut records = Vec::new();
    for row in rows {
        let mut record = Record::with_capacity(header.len());
        for (index, column) in header.iter().enumerate() {
            let value = row.get(index).cloned().unwrap_or_default();
            record.insert(column.clone(), value);
        }
        records.push(record);
    }
    Ok(Document::new(records))
}

/// How a field ended
enum FieldEnd {
    Comma,
    Newline,
    Eof,
}

/// Character-level scanner over the source text.
///
/// Works on `char`s, never bytes, so multi-byte text passes through intact.
struct FieldScanner<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> FieldScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// Scan one field and the separator that ended it.
    ///
    /// Returns the field value, whether it was quoted, and how it ended.
    fn next_field(&mut self) -> DecodeResult<(String, bool, FieldEnd)> {
        while matches!(self.chars.peek(), Some(' ') | Some('\t')) {
            self.chars.next();
        }
        match self.chars.peek() {
            Some(&quote) if quote == '"' || quote == '\'' => self.quoted_field(quote),
            _ => Ok(self.bare_field()),
        }
    }

    fn quoted_field(&mut self, quote: char) -> DecodeResult<(String, bool, FieldEnd)> {
        let opened_on = self.line;
        self.chars.next();
        let mut value = String::new();
        loop {
            match self.chars.next() {
                None => return Err(DecodeError::UnterminatedQuote { line: opened_on }),
                Some(c) if c == quote => {
                    if self.chars.peek() == Some(&quote) {
                        // doubled quote character is one literal quote
                        self.chars.next();
                        value.push(quote);
                    } else {
                        break;
                    }
                }
                Some('\n') => {
                    self.line += 1;
                    value.push('\n');
                }
                Some(c) => value.push(c),
            }
        }
        // only whitespace may sit between a closing quote and the separator
        while matches!(self.chars.peek(), Some(' ') | Some('\t')) {
            self.chars.next();
        }
        let end = match self.chars.peek() {
            None => FieldEnd::Eof,
            Some(',') => {
                self.chars.next();
                FieldEnd::Comma
            }
            Some('\n') => {
                self.chars.next();
                self.line += 1;
                FieldEnd::Newline
            }
            Some('\r') => {
                self.consume_line_break();
                FieldEnd::Newline
            }
            Some(&found) => {
                return Err(DecodeError::TrailingAfterQuote {
                    line: self.line,
                    found,
                })
            }
        };
        Ok((value, true, end))
    }

    fn bare_field(&mut self) -> (String, bool, FieldEnd) {
        let mut value = String::new();
        let end = loop {
            match self.chars.peek() {
                None => break FieldEnd::Eof,
                Some(',') => {
                    self.chars.next();
                    break FieldEnd::Comma;
                }
                Some('\n') => {
                    self.chars.next();
                    self.line += 1;
                    break FieldEnd::Newline;
                }
                Some('\r') => {
                    self.consume_line_break();
                    break FieldEnd::Newline;
                }
                Some(&c) => {
                    self.chars.next();
                    value.push(c);
                }
            }
        };
        (value.trim().to_string(), false, end)
    }

    /// Consume `\r` or `\r\n` as one line break
    fn consume_line_break(&mut self) {
        self.chars.next();
        if self.chars.peek() == Some(&'\n') {
            self.chars.next();
        }
        self.line += 1;
    }
}

/// Split source text into rows of field values, skipping blank lines
fn split_rows(text: &str) -> DecodeResult<Vec<Vec<String>>> {
    let mut scanner = FieldScanner::new(text);
    let mut rows = Vec::new();
    while !scanner.at_end() {
        let mut fields = Vec::new();
        let mut saw_quote = false;
        loop {
            let (value, quoted, end) = scanner.next_field()?;
            saw_quote |= quoted;
            fields.push(value);
            match end {
                FieldEnd::Comma => {}
                FieldEnd::Newline | FieldEnd::Eof => break,
            }
        }
        // a whitespace-only line scans as a single empty bare field
        let blank = !saw_quote && fields.len() == 1 && fields[0].is_empty();
        if !blank {
            rows.push(fields);
        }
    }
    Ok(rows)
}
