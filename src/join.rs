// src/join.rs
//! Co-grouping and the inner join of the two aggregates.

use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::aggregate::Aggregate;
use crate::error::{JoinError, Result, Side};
use crate::key::CompositeKey;

/// All values seen for one key, per side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoGroup {
    pub rainfall: Vec<f64>,
    pub dengue: Vec<f64>,
}

impl CoGroup {
    /// Both sides have at least one value.
    pub fn is_complete(&self) -> bool {
        !self.rainfall.is_empty() && !self.dengue.is_empty()
    }
}

/// Full outer co-group of two multi-valued keyed streams.
pub fn co_group<R, D>(rainfall: R, dengue: D) -> BTreeMap<CompositeKey, CoGroup>
where
    R: IntoIterator<Item = (CompositeKey, f64)>,
    D: IntoIterator<Item = (CompositeKey, f64)>,
{
    let mut groups: BTreeMap<CompositeKey, CoGroup> = BTreeMap::new();
    for (key, value) in rainfall {
        groups.entry(key).or_default().rainfall.push(value);
    }
    for (key, value) in dengue {
        groups.entry(key).or_default().dengue.push(value);
    }
    groups
}

/// One output row: a key present on both sides.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinedRecord {
    pub state: String,
    pub year: String,
    pub month: String,
    pub rainfall: f64,
    pub dengue: f64,
}

impl JoinedRecord {
    pub fn new(key: &CompositeKey, rainfall: f64, dengue: f64) -> Self {
        Self {
            state: key.state().to_string(),
            year: key.year().to_string(),
            month: key.month().to_string(),
            rainfall,
            dengue,
        }
    }

    /// Decompose a `STATE-YEAR-MONTH` string key.
    pub fn decompose(key: &str, rainfall: f64, dengue: f64) -> Result<Self> {
        let key: CompositeKey = key.parse()?;
        Ok(Self::new(&key, rainfall, dengue))
    }

    /// Collapse a complete co-group. Each side must already be reduced to
    /// exactly one value.
    pub fn from_co_group(key: &CompositeKey, group: &CoGroup) -> Result<Self> {
        let rainfall = singleton(key, Side::Rainfall, &group.rainfall)?;
        let dengue = singleton(key, Side::Dengue, &group.dengue)?;
        Ok(Self::new(key, rainfall, dengue))
    }
}

fn singleton(key: &CompositeKey, side: Side, values: &[f64]) -> Result<f64> {
    match values {
        [v] => Ok(*v),
        _ => Err(JoinError::NonSingletonGroup {
            key: key.to_string(),
            side,
            len: values.len(),
        }),
    }
}

/// Rows of complete co-groups, in key order. Incomplete groups are dropped.
pub fn join_co_groups(groups: &BTreeMap<CompositeKey, CoGroup>) -> Result<Vec<JoinedRecord>> {
    groups
        .iter()
        .filter(|(_, g)| g.is_complete())
        .map(|(key, g)| JoinedRecord::from_co_group(key, g))
        .collect()
}

/// Inner join result plus what fell out on each side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Joined {
    pub records: Vec<JoinedRecord>,
    pub rainfall_only: usize,
    pub dengue_only: usize,
}

/// Inner join of the two aggregates by probing the smaller map into the
/// larger one. Output is in key order.
#[instrument(level = "debug", skip_all, fields(rainfall = rainfall.len(), dengue = dengue.len()))]
pub fn inner_join(rainfall: &Aggregate, dengue: &Aggregate) -> Joined {
    let mut matched: Vec<(&CompositeKey, f64, f64)> = if rainfall.len() <= dengue.len() {
        rainfall
            .iter()
            .filter_map(|(k, r)| dengue.get(k).map(|d| (k, *r, *d)))
            .collect()
    } else {
        dengue
            .iter()
            .filter_map(|(k, d)| rainfall.get(k).map(|r| (k, *r, *d)))
            .collect()
    };
    matched.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let joined = Joined {
        rainfall_only: rainfall.len() - matched.len(),
        dengue_only: dengue.len() - matched.len(),
        records: matched
            .into_iter()
            .map(|(k, r, d)| JoinedRecord::new(k, r, d))
            .collect(),
    };
    debug!(
        joined = joined.records.len(),
        rainfall_only = joined.rainfall_only,
        dengue_only = joined.dengue_only,
        "joined aggregates"
    );
    joined
}
