// src/process/write.rs
use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{info, instrument};

/// Write `header` then every line, each `\n` terminated. Returns the number
/// of data lines written.
#[instrument(level = "info", skip(path, header, lines), fields(path = %path.as_ref().display()))]
pub fn write_text<P: AsRef<Path>>(path: P, header: &str, lines: &[String]) -> Result<u64> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{}", header)?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    info!(lines = lines.len(), "wrote output");
    Ok(lines.len() as u64)
}
