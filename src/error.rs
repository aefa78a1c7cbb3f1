// src/error.rs
use thiserror::Error;

use crate::record::Dataset;

/// Result type for the record, key, aggregation, join and format stages.
pub type Result<T> = std::result::Result<T, JoinError>;

/// Which side of the join a value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Rainfall,
    Dengue,
}

impl Side {
    pub fn as_str(&self) -> &str {
        match self {
            Side::Rainfall => "chuvas",
            Side::Dengue => "dengue",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JoinError {
    /// Raw line does not split into the schema's field count.
    #[error("malformed {dataset} record{}: expected {expected} fields, found {found}", line_suffix(.line))]
    MalformedRecord {
        dataset: Dataset,
        expected: usize,
        found: usize,
        line: Option<u64>,
    },

    /// A field that must be numeric could not be parsed.
    #[error("non-numeric value {value:?} in field `{field}`{}", line_suffix(.line))]
    NonNumericField {
        field: &'static str,
        value: String,
        line: Option<u64>,
    },

    /// Date without a year and a month component.
    #[error("malformed date {date:?}: expected at least YYYY-MM")]
    MalformedDate { date: String },

    /// State that cannot be part of a reversible composite key.
    #[error("invalid state {state:?}: must be non-empty and must not contain '-'")]
    InvalidState { state: String },

    /// Composite key that does not split into state, year and month.
    #[error("malformed composite key {key:?}: expected STATE-YEAR-MONTH")]
    MalformedKey { key: String },

    /// Joiner received a group that was not reduced to one value.
    #[error("key {key} has {len} {side} values, expected exactly one")]
    NonSingletonGroup { key: String, side: Side, len: usize },
}

impl JoinError {
    /// Attach the 1-based input line number to a record level error.
    pub fn at_line(self, n: u64) -> Self {
        match self {
            JoinError::MalformedRecord {
                dataset,
                expected,
                found,
                ..
            } => JoinError::MalformedRecord {
                dataset,
                expected,
                found,
                line: Some(n),
            },
            JoinError::NonNumericField { field, value, .. } => JoinError::NonNumericField {
                field,
                value,
                line: Some(n),
            },
            other => other,
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(n) => format!(" at line {}", n),
        None => String::new(),
    }
}
