use anyhow::Result;
use clap::Parser;
use dengue_rain::{process, Cli};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = match cli.verbose {
        0 => env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) resolve configuration ────────────────────────────────────
    let config = cli.resolve()?;
    info!(
        dengue = %config.dengue_path.display(),
        rainfall = %config.rainfall_path.display(),
        output = %config.output_path().display(),
        "configured"
    );

    // ─── 3) run the pipeline ─────────────────────────────────────────
    let summary = match process::run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            error!("pipeline failed: {:#}", e);
            return Err(e);
        }
    };
    summary.log();

    // ─── 4) optional run report ──────────────────────────────────────
    if let Some(path) = &cli.summary {
        summary.write_json(path)?;
        info!("wrote summary {}", path.display());
    }

    info!("all done");
    Ok(())
}
