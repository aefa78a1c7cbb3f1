// src/key.rs
//! `STATE-YEAR-MONTH` partition keys shared by both datasets.

use std::{fmt, str::FromStr};

use crate::error::{JoinError, Result};

/// First two `-` separated components of a date: `"2015-08-01"` → `"2015-08"`.
/// Anything after the month (day, time) is ignored.
pub fn year_month(date: &str) -> Result<&str> {
    let mut parts = date.splitn(3, '-');
    let year = parts.next().unwrap_or_default();
    let month = parts.next().unwrap_or_default();
    if year.is_empty() || month.is_empty() {
        return Err(JoinError::MalformedDate {
            date: date.to_string(),
        });
    }
    Ok(&date[..year.len() + 1 + month.len()])
}

/// One aggregation bucket and the join key between dengue and rainfall.
///
/// Ordering is by state, then year, then month; that is the order of the
/// output file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey {
    state: String,
    year: String,
    month: String,
}

impl CompositeKey {
    /// Build a key from a state and a `YYYY-MM` (or longer) date.
    pub fn from_date(state: &str, date: &str) -> Result<Self> {
        let ym = year_month(date)?;
        // year_month guarantees exactly one '-' in `ym`
        let (year, month) = ym.split_once('-').ok_or_else(|| JoinError::MalformedDate {
            date: date.to_string(),
        })?;
        Self::new(state, year, month)
    }

    pub fn new(state: &str, year: &str, month: &str) -> Result<Self> {
        if state.is_empty() || state.contains('-') {
            return Err(JoinError::InvalidState {
                state: state.to_string(),
            });
        }
        if year.is_empty() || month.is_empty() || year.contains('-') || month.contains('-') {
            return Err(JoinError::MalformedKey {
                key: format!("{}-{}-{}", state, year, month),
            });
        }
        Ok(Self {
            state: state.to_string(),
            year: year.to_string(),
            month: month.to_string(),
        })
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn month(&self) -> &str {
        &self.month
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.state, self.year, self.month)
    }
}

impl FromStr for CompositeKey {
    type Err = JoinError;

    /// Split on `-` into exactly `(state, year, month)`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [state, year, month] => Self::new(state, year, month).map_err(|_| {
                JoinError::MalformedKey { key: s.to_string() }
            }),
            _ => Err(JoinError::MalformedKey { key: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month_ignores_trailing_components() -> Result<()> {
        assert_eq!(year_month("2015-08-01")?, "2015-08");
        assert_eq!(year_month("2015-08")?, "2015-08");
        assert_eq!(year_month("2015-08-01-12:00:00")?, "2015-08");
        assert_eq!(year_month("2016-1-3 00:00")?, "2016-1");
        Ok(())
    }

    #[test]
    fn year_month_needs_two_components() {
        for bad in ["2015", "", "-08-01", "2015-", "2015--01"] {
            assert_eq!(
                year_month(bad),
                Err(JoinError::MalformedDate {
                    date: bad.to_string()
                }),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn key_display_and_parse_are_inverse() -> Result<()> {
        let key = CompositeKey::from_date("CE", "2015-08-05")?;
        assert_eq!(key.to_string(), "CE-2015-08");
        let back: CompositeKey = key.to_string().parse()?;
        assert_eq!(back, key);
        assert_eq!(
            (back.state(), back.year(), back.month()),
            ("CE", "2015", "08")
        );
        Ok(())
    }

    #[test]
    fn states_with_hyphens_are_rejected() {
        assert!(matches!(
            CompositeKey::from_date("RIO-GRANDE", "2015-08-01"),
            Err(JoinError::InvalidState { .. })
        ));
        assert!(matches!(
            CompositeKey::from_date("", "2015-08-01"),
            Err(JoinError::InvalidState { .. })
        ));
    }

    #[test]
    fn parse_requires_three_components() {
        for bad in ["CE-2015", "CE-2015-08-01", "CE", "-2015-08", ""] {
            assert!(
                matches!(bad.parse::<CompositeKey>(), Err(JoinError::MalformedKey { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn keys_sort_by_state_then_date() -> Result<()> {
        let mut keys = vec![
            CompositeKey::from_date("SP", "2015-01")?,
            CompositeKey::from_date("CE", "2016-01")?,
            CompositeKey::from_date("CE", "2015-12")?,
        ];
        keys.sort();
        let shown: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(shown, ["CE-2015-12", "CE-2016-01", "SP-2015-01"]);
        Ok(())
    }
}
