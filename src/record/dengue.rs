// src/record/dengue.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{JoinError, Result};
use crate::key::{year_month, CompositeKey};
use crate::record::{check_arity, split_line, Dataset};

static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit regex"));

/// One row of the dengue case dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct DengueRecord {
    pub id: String,
    /// `data_iniSE`, "YYYY-MM-DD..."
    pub report_date: String,
    /// `casos`, raw; may be blank or a placeholder.
    pub case_count: String,
    pub ibge_code: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub latitude: String,
    pub longitude: String,
    /// `YYYY-MM` taken from `report_date` when the record is bound.
    pub year_month: String,
}

impl DengueRecord {
    /// Parse one pipe-delimited (or `sep`-delimited) line.
    pub fn parse(line: &str, sep: char) -> Result<Self> {
        Self::from_fields(&split_line(line, sep))
    }

    /// Bind positional values to the nine dengue columns.
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        check_arity(Dataset::Dengue, fields)?;
        let year_month = year_month(fields[1])?.to_string();
        Ok(Self {
            id: fields[0].to_string(),
            report_date: fields[1].to_string(),
            case_count: fields[2].to_string(),
            ibge_code: fields[3].to_string(),
            city: fields[4].to_string(),
            state: fields[5].to_string(),
            postal_code: fields[6].to_string(),
            latitude: fields[7].to_string(),
            longitude: fields[8].to_string(),
            year_month,
        })
    }

    /// Numeric case count. No digit at all means a gap in the source and
    /// counts as `0.0`; digits that do not form a number are an error.
    pub fn case_value(&self) -> Result<f64> {
        if !DIGIT.is_match(&self.case_count) {
            return Ok(0.0);
        }
        self.case_count
            .trim()
            .parse::<f64>()
            .map_err(|_| JoinError::NonNumericField {
                field: "casos",
                value: self.case_count.clone(),
                line: None,
            })
    }

    pub fn key(&self) -> Result<CompositeKey> {
        CompositeKey::from_date(&self.state, &self.year_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "1|2015-08-05|10|230440|Fortaleza|CE|60000|-3.7|-38.5";

    #[test]
    fn parses_example_line() -> Result<()> {
        let rec = DengueRecord::parse(LINE, '|')?;
        assert_eq!(rec.id, "1");
        assert_eq!(rec.report_date, "2015-08-05");
        assert_eq!(rec.city, "Fortaleza");
        assert_eq!(rec.state, "CE");
        assert_eq!(rec.longitude, "-38.5");
        assert_eq!(rec.year_month, "2015-08");
        assert_eq!(rec.case_value()?, 10.0);
        assert_eq!(rec.key()?.to_string(), "CE-2015-08");
        Ok(())
    }

    #[test]
    fn case_field_without_digits_defaults_to_zero() -> Result<()> {
        for raw in ["", " ", "-", "NA", "null", "."] {
            let line = format!("1|2015-08-05|{}|230440|Fortaleza|CE|60000|-3.7|-38.5", raw);
            let rec = DengueRecord::parse(&line, '|')?;
            assert_eq!(rec.case_value()?, 0.0, "{raw:?}");
        }
        Ok(())
    }

    #[test]
    fn case_field_with_digits_must_be_numeric() -> Result<()> {
        let rec = DengueRecord::parse(
            "1|2015-08-05|12a|230440|Fortaleza|CE|60000|-3.7|-38.5",
            '|',
        )?;
        assert_eq!(
            rec.case_value(),
            Err(JoinError::NonNumericField {
                field: "casos",
                value: "12a".into(),
                line: None,
            })
        );

        let rec = DengueRecord::parse(
            "1|2015-08-05|169.0|230440|Fortaleza|CE|60000|-3.7|-38.5",
            '|',
        )?;
        assert_eq!(rec.case_value()?, 169.0);
        Ok(())
    }

    #[test]
    fn short_line_is_malformed() {
        let err = DengueRecord::parse("1|2015-08-05|10|230440", '|').unwrap_err();
        assert!(matches!(
            err,
            JoinError::MalformedRecord {
                dataset: Dataset::Dengue,
                expected: 9,
                found: 4,
                ..
            }
        ));
    }

    #[test]
    fn bad_report_date_is_rejected_at_bind_time() {
        let err = DengueRecord::parse("1|201508|10|230440|Fortaleza|CE|60000|-3.7|-38.5", '|')
            .unwrap_err();
        assert_eq!(
            err,
            JoinError::MalformedDate {
                date: "201508".into()
            }
        );
    }
}
