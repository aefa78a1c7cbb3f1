// src/process/mod.rs
//! The pipeline as explicit stages:
//! read → bind → aggregate (each dataset on its own) → join → format → write.

pub mod read;
pub mod write;

use anyhow::{Context, Result};
use chrono::Utc;
use std::time::Instant;
use tracing::{info, instrument};

use crate::{
    aggregate::{aggregate_dengue, aggregate_rainfall},
    config::PipelineConfig,
    format::{format_line, header},
    join::{inner_join, Joined},
    record::{DengueRecord, RainfallRecord},
    summary::RunSummary,
};

/// Both aggregates joined, with the key counts they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutput {
    pub dengue_keys: usize,
    pub rainfall_keys: usize,
    pub joined: Joined,
}

/// Aggregate the two datasets side by side, then inner join them.
pub fn join_datasets(
    dengue: &[DengueRecord],
    rainfall: &[RainfallRecord],
) -> crate::Result<JoinOutput> {
    let (dengue_agg, rainfall_agg) =
        rayon::join(|| aggregate_dengue(dengue), || aggregate_rainfall(rainfall));
    let dengue_agg = dengue_agg?;
    let rainfall_agg = rainfall_agg?;

    Ok(JoinOutput {
        dengue_keys: dengue_agg.len(),
        rainfall_keys: rainfall_agg.len(),
        joined: inner_join(&rainfall_agg, &dengue_agg),
    })
}

/// Lines in, lines out. Input lines carry no header; output has none either.
/// Errors name the 1-based position of the offending line in its input.
pub fn transform_lines<'a, D, R>(
    dengue_lines: D,
    rainfall_lines: R,
    config: &PipelineConfig,
) -> crate::Result<Vec<String>>
where
    D: IntoIterator<Item = &'a str>,
    R: IntoIterator<Item = &'a str>,
{
    let dengue = dengue_lines
        .into_iter()
        .zip(1u64..)
        .map(|(l, n)| DengueRecord::parse(l, config.dengue_separator).map_err(|e| e.at_line(n)))
        .collect::<crate::Result<Vec<_>>>()?;
    let rainfall = rainfall_lines
        .into_iter()
        .zip(1u64..)
        .map(|(l, n)| {
            RainfallRecord::parse(l, config.rainfall_separator).map_err(|e| e.at_line(n))
        })
        .collect::<crate::Result<Vec<_>>>()?;

    let out = join_datasets(&dengue, &rainfall)?;
    Ok(out
        .joined
        .records
        .iter()
        .map(|r| format_line(r, config.output_separator))
        .collect())
}

/// Run the whole job described by `config` on its own rayon pool.
#[instrument(level = "info", skip(config), fields(dengue = %config.dengue_path.display(), rainfall = %config.rainfall_path.display()))]
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    config.validate()?;
    let threads = config.threads.unwrap_or_else(num_cpus::get);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("dengue-rain-{}", i))
        .build()
        .context("building worker pool")?;
    info!(threads, "starting pipeline");
    pool.install(|| run_stages(config))
}

fn run_stages(config: &PipelineConfig) -> Result<RunSummary> {
    let started_at = Utc::now();
    let start = Instant::now();

    // ─── 1) read + bind both datasets ───────────────────────────────
    let (dengue, rainfall) = rayon::join(
        || {
            read::read_dengue(
                &config.dengue_path,
                config.dengue_separator,
                config.skip_header_lines,
            )
        },
        || {
            read::read_rainfall(
                &config.rainfall_path,
                config.rainfall_separator,
                config.skip_header_lines,
            )
        },
    );
    let (dengue, rainfall) = (dengue?, rainfall?);
    info!(
        dengue = dengue.len(),
        rainfall = rainfall.len(),
        elapsed = ?start.elapsed(),
        "loaded records"
    );

    // ─── 2) aggregate + join ─────────────────────────────────────────
    let out = join_datasets(&dengue, &rainfall).context("aggregating and joining")?;

    // ─── 3) format + write ───────────────────────────────────────────
    let lines: Vec<String> = out
        .joined
        .records
        .iter()
        .map(|r| format_line(r, config.output_separator))
        .collect();
    let output_path = config.output_path();
    write::write_text(&output_path, &header(config.output_separator), &lines)?;

    Ok(RunSummary {
        started_at,
        finished_at: Utc::now(),
        dengue_records: dengue.len(),
        rainfall_records: rainfall.len(),
        dengue_keys: out.dengue_keys,
        rainfall_keys: out.rainfall_keys,
        joined_records: lines.len(),
        dropped_dengue_only: out.joined.dengue_only,
        dropped_rainfall_only: out.joined.rainfall_only,
        output_path: output_path.display().to_string(),
    })
}
