// src/record/rainfall.rs
use crate::error::{JoinError, Result};
use crate::key::CompositeKey;
use crate::record::{check_arity, split_line, Dataset};

/// One reading of the rainfall dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct RainfallRecord {
    pub date: String,
    pub millimeters: String,
    pub state: String,
}

impl RainfallRecord {
    pub fn parse(line: &str, sep: char) -> Result<Self> {
        Self::from_fields(&split_line(line, sep))
    }

    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        check_arity(Dataset::Rainfall, fields)?;
        Ok(Self {
            date: fields[0].to_string(),
            millimeters: fields[1].to_string(),
            state: fields[2].to_string(),
        })
    }

    /// Reading in mm, negative sensor values clamped to `0.0`.
    /// Blank or non-numeric readings are errors.
    pub fn millimeters_value(&self) -> Result<f64> {
        let mm = self
            .millimeters
            .trim()
            .parse::<f64>()
            .map_err(|_| JoinError::NonNumericField {
                field: "mm",
                value: self.millimeters.clone(),
                line: None,
            })?;
        // also folds -0.0 into 0.0
        Ok(if mm <= 0.0 { 0.0 } else { mm })
    }

    /// `(STATE-YEAR-MONTH, mm)`, derived inline from the raw date.
    pub fn entry(&self) -> Result<(CompositeKey, f64)> {
        let key = CompositeKey::from_date(&self.state, &self.date)?;
        Ok((key, self.millimeters_value()?))
    }
}
