//! Column type classification
//!
//! Value classes a column can be suggested as. Classification is transient
//! and advisory; decoded values stay strings regardless of what a column
//! profiles as.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Best-effort value classes used for filter suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Float,
    /// true/false-style flag
    Boolean,
    /// Calendar date, ISO-style
    Date,
    /// Anything else
    Text,
}

impl ColumnType {
    /// Returns the type name for UI display
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
        }
    }

    /// Whether a single non-empty value belongs to this class
    pub fn matches(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            ColumnType::Integer => value.parse::<i64>().is_ok(),
            ColumnType::Float => value.parse::<f64>().is_ok(),
            ColumnType::Boolean => matches!(
                value.to_ascii_lowercase().as_str(),
                "true" | "false" | "yes" | "no" | "0" | "1"
            ),
            ColumnType::Date => parse_date(value).is_some(),
            ColumnType::Text => true,
        }
    }
}

/// ISO-style date parsing; deliberately not locale-aware
pub(super) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .ok()
}
