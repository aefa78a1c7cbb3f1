// src/config.rs
//! Run configuration: defaults < YAML file < command line / environment.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::format::OUTPUT_SEPARATOR;
use crate::record::Dataset;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Pipe-delimited dengue cases, one header line.
    pub dengue_path: PathBuf,
    /// Comma-delimited rainfall readings, one header line.
    pub rainfall_path: PathBuf,
    /// Output path without shard and suffix.
    pub output_prefix: PathBuf,
    pub output_suffix: String,
    pub dengue_separator: char,
    pub rainfall_separator: char,
    pub output_separator: char,
    /// Leading rows dropped from each input file.
    pub skip_header_lines: usize,
    /// Worker threads; `None` uses one per CPU.
    pub threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dengue_path: PathBuf::from("../Dados/casos_dengue.txt"),
            rainfall_path: PathBuf::from("../Dados/chuvas.csv"),
            output_prefix: PathBuf::from("../Dados/resultado"),
            output_suffix: ".csv".into(),
            dengue_separator: Dataset::Dengue.default_separator(),
            rainfall_separator: Dataset::Rainfall.default_separator(),
            output_separator: OUTPUT_SEPARATOR,
            skip_header_lines: 1,
            threads: None,
        }
    }
}

impl PipelineConfig {
    /// Load a YAML file; missing keys keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, sep) in [
            ("dengue_separator", self.dengue_separator),
            ("rainfall_separator", self.rainfall_separator),
            ("output_separator", self.output_separator),
        ] {
            if !sep.is_ascii() {
                bail!("{} must be a single ASCII character, got {:?}", name, sep);
            }
            // '-' splits dates and composite keys
            if sep == '-' {
                bail!("{} cannot be '-'", name);
            }
        }
        if self.threads == Some(0) {
            bail!("threads must be at least 1");
        }
        Ok(())
    }

    /// Single-shard output file: `{prefix}-00000-of-00001{suffix}`.
    pub fn output_path(&self) -> PathBuf {
        let mut name = self.output_prefix.clone().into_os_string();
        name.push("-00000-of-00001");
        name.push(&self.output_suffix);
        PathBuf::from(name)
    }
}

/// Join monthly dengue cases with monthly rainfall per state.
#[derive(Parser, Debug)]
#[command(name = "dengue-rain")]
#[command(about = "Join monthly dengue cases and rainfall by state into one CSV", long_about = None)]
#[command(version)]
pub struct Cli {
    /// YAML file with pipeline settings
    #[arg(short, long, env = "DENGUE_RAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dengue cases file
    #[arg(long, env = "DENGUE_PATH")]
    pub dengue: Option<PathBuf>,

    /// Rainfall file
    #[arg(long, env = "RAINFALL_PATH")]
    pub rainfall: Option<PathBuf>,

    /// Output prefix; the shard name and suffix are appended
    #[arg(short, long, env = "OUTPUT_PREFIX")]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub output_suffix: Option<String>,

    #[arg(long)]
    pub dengue_separator: Option<char>,

    #[arg(long)]
    pub rainfall_separator: Option<char>,

    #[arg(long)]
    pub output_separator: Option<char>,

    #[arg(long)]
    pub skip_header_lines: Option<usize>,

    /// Worker threads (defaults to one per CPU)
    #[arg(short = 'j', long, env = "DENGUE_RAIN_THREADS")]
    pub threads: Option<usize>,

    /// Write a JSON run summary here
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// -v for debug, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Final configuration, validated.
    pub fn resolve(&self) -> Result<PipelineConfig> {
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::from_yaml_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(p) = &self.dengue {
            cfg.dengue_path = p.clone();
        }
        if let Some(p) = &self.rainfall {
            cfg.rainfall_path = p.clone();
        }
        if let Some(p) = &self.output {
            cfg.output_prefix = p.clone();
        }
        if let Some(s) = &self.output_suffix {
            cfg.output_suffix = s.clone();
        }
        if let Some(c) = self.dengue_separator {
            cfg.dengue_separator = c;
        }
        if let Some(c) = self.rainfall_separator {
            cfg.rainfall_separator = c;
        }
        if let Some(c) = self.output_separator {
            cfg.output_separator = c;
        }
        if let Some(n) = self.skip_header_lines {
            cfg.skip_header_lines = n;
        }
        if self.threads.is_some() {
            cfg.threads = self.threads;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_the_batch_job_layout() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.dengue_separator, '|');
        assert_eq!(cfg.rainfall_separator, ',');
        assert_eq!(cfg.output_separator, ';');
        assert_eq!(cfg.skip_header_lines, 1);
        assert_eq!(
            cfg.output_path(),
            PathBuf::from("../Dados/resultado-00000-of-00001.csv")
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn yaml_file_fills_missing_keys_with_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "dengue_path: data/dengue.txt")?;
        writeln!(file, "output_suffix: .txt")?;
        writeln!(file, "threads: 2")?;

        let cfg = PipelineConfig::from_yaml_file(file.path())?;
        assert_eq!(cfg.dengue_path, PathBuf::from("data/dengue.txt"));
        assert_eq!(cfg.output_suffix, ".txt");
        assert_eq!(cfg.threads, Some(2));
        assert_eq!(cfg.rainfall_path, PipelineConfig::default().rainfall_path);
        Ok(())
    }

    #[test]
    fn command_line_overrides_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "dengue_path: from-file.txt")?;
        writeln!(file, "rainfall_path: rain-file.csv")?;
        let cfg_path = file.path().to_string_lossy().to_string();

        let cli = Cli::try_parse_from([
            "dengue-rain",
            "--config",
            cfg_path.as_str(),
            "--dengue",
            "cli.txt",
            "--output-separator",
            ",",
        ])?;
        let cfg = cli.resolve()?;
        assert_eq!(cfg.dengue_path, PathBuf::from("cli.txt"));
        assert_eq!(cfg.rainfall_path, PathBuf::from("rain-file.csv"));
        assert_eq!(cfg.output_separator, ',');
        Ok(())
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let cfg = PipelineConfig {
            rainfall_separator: '-',
            ..PipelineConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = PipelineConfig {
            output_separator: 'ç',
            ..PipelineConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = PipelineConfig {
            threads: Some(0),
            ..PipelineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
