//! Per-column type inference

use serde::Serialize;

use super::types::ColumnType;
use crate::codec::Document;

/// Share of non-empty values a candidate class must cover to win over
/// plain text
const CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Candidate classes in tie-break order. Integer precedes Float because
/// every integer also parses as a float.
const CANDIDATES: [ColumnType; 4] = [
    ColumnType::Integer,
    ColumnType::Float,
    ColumnType::Boolean,
    ColumnType::Date,
];

/// Inferred metadata for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    /// Column name
    pub column: String,
    /// Best-guess value class
    pub inferred: ColumnType,
    /// Share of non-empty values matching the inferred class, in [0, 1]
    pub confidence: f64,
    /// Number of non-empty values examined
    pub samples: usize,
}

/// Profile every column of a document, in column order.
///
/// Empty values do not vote. A column with no non-empty values profiles as
/// text with zero confidence.
pub fn profile(document: &Document) -> Vec<ColumnProfile> {
    document
        .columns()
        .into_iter()
        .map(|column| profile_column(document, column))
        .collect()
}

fn profile_column(document: &Document, column: String) -> ColumnProfile {
    let values: Vec<&str> = document
        .records()
        .iter()
        .filter_map(|record| record.get(&column))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();

    if values.is_empty() {
        return ColumnProfile {
            column,
            inferred: ColumnType::Text,
            confidence: 0.0,
            samples: 0,
        };
    }

    let mut best = (ColumnType::Text, 0.0_f64);
    for candidate in CANDIDATES {
        let hits = values.iter().filter(|v| candidate.matches(v)).count();
        let ratio = hits as f64 / values.len() as f64;
        // strictly greater, so earlier candidates win ties
        if ratio >= CONFIDENCE_THRESHOLD && ratio > best.1 {
            best = (candidate, ratio);
        }
    }

    let (inferred, confidence) = if best.0 == ColumnType::Text {
        (ColumnType::Text, 1.0)
    } else {
        best
    };

    ColumnProfile {
        column,
        inferred,
        confidence,
        samples: values.len(),
    }
}
