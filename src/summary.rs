// src/summary.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{fs, path::Path};
use tracing::info;

/// What a pipeline run read, joined and wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dengue_records: usize,
    pub rainfall_records: usize,
    pub dengue_keys: usize,
    pub rainfall_keys: usize,
    pub joined_records: usize,
    /// Keys with cases but no rainfall.
    pub dropped_dengue_only: usize,
    /// Keys with rainfall but no cases.
    pub dropped_rainfall_only: usize,
    pub output_path: String,
}

impl RunSummary {
    pub fn elapsed_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    pub fn log(&self) {
        info!(
            dengue_records = self.dengue_records,
            rainfall_records = self.rainfall_records,
            joined = self.joined_records,
            dengue_only = self.dropped_dengue_only,
            rainfall_only = self.dropped_rainfall_only,
            output = %self.output_path,
            "run finished in {:.3}s",
            self.elapsed_seconds()
        );
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("serializing run summary")?;
        fs::write(path, json).with_context(|| format!("writing summary {}", path.display()))
    }
}
