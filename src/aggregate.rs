// src/aggregate.rs
//! Per-key reduction of each dataset to a single value.
//!
//! Both sides are plain commutative sums, so the parallel folds below produce
//! one map per rayon split and merge them by adding.

use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::key::CompositeKey;
use crate::record::{DengueRecord, RainfallRecord};

/// Aggregated value per composite key.
pub type Aggregate = HashMap<CompositeKey, f64>;

/// Sum values sharing a key.
pub fn sum_per_key<I>(entries: I) -> Aggregate
where
    I: IntoIterator<Item = (CompositeKey, f64)>,
{
    let mut acc = Aggregate::new();
    for (key, value) in entries {
        *acc.entry(key).or_insert(0.0) += value;
    }
    acc
}

fn merge(mut a: Aggregate, b: Aggregate) -> Aggregate {
    if a.len() < b.len() {
        return merge(b, a);
    }
    for (key, value) in b {
        *a.entry(key).or_insert(0.0) += value;
    }
    a
}

/// Round to one decimal place, correctly rounded from the exact binary value
/// (`0.35` is stored just below the tie and gives `0.3`).
pub fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // shortest formatting rounds on the exact decimal expansion
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Bucket dengue records by state (`uf`).
pub fn group_by_state(records: &[DengueRecord]) -> BTreeMap<&str, Vec<&DengueRecord>> {
    let mut groups: BTreeMap<&str, Vec<&DengueRecord>> = BTreeMap::new();
    for rec in records {
        groups.entry(rec.state.as_str()).or_default().push(rec);
    }
    groups
}

/// `(STATE-YEAR-MONTH, cases)` for every record of one state bucket.
pub fn case_entries<'a>(
    state: &'a str,
    records: &'a [&'a DengueRecord],
) -> impl Iterator<Item = Result<(CompositeKey, f64)>> + 'a {
    records.iter().map(move |rec| {
        let key = CompositeKey::from_date(state, &rec.year_month)?;
        Ok((key, rec.case_value()?))
    })
}

/// Total cases per key.
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn aggregate_dengue(records: &[DengueRecord]) -> Result<Aggregate> {
    let groups: Vec<(&str, Vec<&DengueRecord>)> = group_by_state(records).into_iter().collect();
    debug!(states = groups.len(), "grouped dengue records by state");

    let agg = groups
        .par_iter()
        .map(|(state, recs)| {
            case_entries(state, recs)
                .collect::<Result<Vec<_>>>()
                .map(sum_per_key)
        })
        .try_reduce(Aggregate::new, |a, b| Ok(merge(a, b)))?;

    debug!(keys = agg.len(), "summed dengue cases");
    Ok(agg)
}

/// Total rainfall per key: clamp each reading, sum, then round the sum once.
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn aggregate_rainfall(records: &[RainfallRecord]) -> Result<Aggregate> {
    let sums = records
        .par_iter()
        .map(RainfallRecord::entry)
        .try_fold(Aggregate::new, |mut acc, entry| -> Result<Aggregate> {
            let (key, mm) = entry?;
            *acc.entry(key).or_insert(0.0) += mm;
            Ok(acc)
        })
        .try_reduce(Aggregate::new, |a, b| Ok(merge(a, b)))?;

    let agg: Aggregate = sums
        .into_iter()
        .map(|(key, total)| (key, round_one_decimal(total)))
        .collect();
    debug!(keys = agg.len(), "summed rainfall");
    Ok(agg)
}
