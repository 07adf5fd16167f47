use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use balgrid_core::{pipeline, PipelineConfig};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: balgrid <input CSV path>";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Resample a balance log onto a gap-filled 15-minute grid",
    long_about = None
)]
struct Cli {
    /// CSV exported from the trading terminal (needs 時間 and 残高 columns)
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let Some(input) = cli.input else {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    };

    match run(&input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("processing failed: {err:#}");
            println!("processing failed.");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &Path) -> Result<()> {
    let config = PipelineConfig::from_env().context("failed to load configuration")?;
    let output = pipeline::process_file(input, &config)
        .with_context(|| format!("failed to process {}", input.display()))?;

    info!(
        observed = output.report.observed_rows,
        filled = output.report.missing_slots,
        "run summary"
    );
    println!("processing complete.");
    println!("output: {}", output.output_path.display());
    println!("{}", output.dataframe.head(Some(config.preview_rows)));
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if env::var("BALGRID_LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}
