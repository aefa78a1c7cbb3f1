// src/process/read.rs
use anyhow::{bail, Context, Result};
use csv::{ByteRecord, ReaderBuilder};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::record::{clean_str, DengueRecord, RainfallRecord};

/// One input row, before schema binding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub fields: Vec<String>,
}

/// Read every data row of a delimited file.
///
/// Quoting is off (the datasets never quote) and rows may have any width so
/// arity problems are reported by the record binding, not by the CSV reader.
/// The first `skip_header_lines` rows are dropped; blank lines are skipped by
/// the reader and never count as a header.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_rows<P: AsRef<Path>>(path: P, sep: char, skip_header_lines: usize) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    if !sep.is_ascii() {
        bail!("separator {:?} is not an ASCII character", sep);
    }

    let mut rdr = ReaderBuilder::new()
        .delimiter(sep as u8)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    let mut skipped = 0;
    loop {
        let more = rdr
            .read_byte_record(&mut record)
            .with_context(|| format!("reading {}", path.display()))?;
        if !more {
            break;
        }
        if skipped < skip_header_lines {
            skipped += 1;
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        // source files are not guaranteed to be UTF-8 (city names)
        let fields = record
            .iter()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect();
        rows.push(RawRow { line, fields });
    }

    info!(rows = rows.len(), "read rows");
    Ok(rows)
}

/// Bind raw rows in parallel. The first failing row aborts with its line number.
pub fn bind_rows<T, F>(rows: &[RawRow], bind: F) -> crate::Result<Vec<T>>
where
    T: Send,
    F: Fn(&[&str]) -> crate::Result<T> + Sync,
{
    rows.par_iter()
        .map(|row| {
            let fields: Vec<&str> = row.fields.iter().map(|f| clean_str(f)).collect();
            bind(&fields).map_err(|e| e.at_line(row.line))
        })
        .collect()
}

pub fn read_dengue<P: AsRef<Path>>(path: P, sep: char, skip_header_lines: usize) -> Result<Vec<DengueRecord>> {
    let path = path.as_ref();
    let rows = read_rows(path, sep, skip_header_lines)?;
    let records = bind_rows(&rows, DengueRecord::from_fields)
        .with_context(|| format!("parsing dengue records in {}", path.display()))?;
    debug!(records = records.len(), "bound dengue records");
    Ok(records)
}

pub fn read_rainfall<P: AsRef<Path>>(path: P, sep: char, skip_header_lines: usize) -> Result<Vec<RainfallRecord>> {
    let path = path.as_ref();
    let rows = read_rows(path, sep, skip_header_lines)?;
    let records = bind_rows(&rows, RainfallRecord::from_fields)
        .with_context(|| format!("parsing rainfall records in {}", path.display()))?;
    debug!(records = records.len(), "bound rainfall records");
    Ok(records)
}
