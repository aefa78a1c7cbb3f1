// src/record/mod.rs
//! Binding of raw delimited lines to the two input schemas.

pub mod dengue;
pub mod rainfall;

pub use dengue::DengueRecord;
pub use rainfall::RainfallRecord;

use crate::error::{JoinError, Result};

/// Column order of the pipe-delimited dengue dataset.
pub const DENGUE_COLUMNS: [&str; 9] = [
    "id",
    "data_iniSE",
    "casos",
    "ibge_code",
    "cidade",
    "uf",
    "cep",
    "latitude",
    "longitude",
];

/// Column order of the comma-delimited rainfall dataset.
pub const RAINFALL_COLUMNS: [&str; 3] = ["data", "mm", "uf"];

/// The two input datasets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dataset {
    Dengue,
    Rainfall,
}

impl Dataset {
    pub fn as_str(&self) -> &str {
        match self {
            Dataset::Dengue => "dengue",
            Dataset::Rainfall => "rainfall",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Dataset::Dengue => &DENGUE_COLUMNS,
            Dataset::Rainfall => &RAINFALL_COLUMNS,
        }
    }

    pub fn default_separator(&self) -> char {
        match self {
            Dataset::Dengue => '|',
            Dataset::Rainfall => ',',
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Split a raw line on `sep` into cleaned positional values.
/// A trailing `\r` / `\n` left over from the line reader is ignored.
pub fn split_line(line: &str, sep: char) -> Vec<&str> {
    line.trim_end_matches(['\r', '\n'])
        .split(sep)
        .map(clean_str)
        .collect()
}

/// Fixed-arity binding: the number of values must equal the schema width.
pub(crate) fn check_arity(dataset: Dataset, fields: &[&str]) -> Result<()> {
    let expected = dataset.columns().len();
    if fields.len() != expected {
        return Err(JoinError::MalformedRecord {
            dataset,
            expected,
            found: fields.len(),
            line: None,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_str_strips_quotes_and_whitespace() {
        assert_eq!(clean_str("  \"CE\" "), "CE");
        assert_eq!(clean_str("\""), "\"");
        assert_eq!(clean_str(" 15.2"), "15.2");
    }

    #[test]
    fn split_line_keeps_empty_fields() {
        assert_eq!(
            split_line("1||10\r\n", '|'),
            vec!["1", "", "10"]
        );
        assert_eq!(split_line("", ','), vec![""]);
    }

    #[test]
    fn arity_must_match_exactly() {
        assert!(check_arity(Dataset::Rainfall, &["2015-08-03", "1.0", "CE"]).is_ok());
        let err = check_arity(Dataset::Rainfall, &["2015-08-03", "1.0"]).unwrap_err();
        assert_eq!(
            err,
            JoinError::MalformedRecord {
                dataset: Dataset::Rainfall,
                expected: 3,
                found: 2,
                line: None,
            }
        );
        assert!(check_arity(Dataset::Rainfall, &["a", "b", "c", "d"]).is_err());
    }
}
