use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use vin_engine::{
    export_to_dir, read_queries_from_path, run_queries, write_csv, LogSink, EXPORT_FILENAME,
};
use vin_logging::{vin_info, LevelFilter, LogDestination};

use crate::cli::{Cli, Commands};
use crate::server;
use crate::settings::{load_settings, save_settings, Settings, SETTINGS_FILENAME};

pub fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    vin_logging::initialize(destination, level);
}

pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME));
    let mut settings = load_settings(&config_path);
    cli.overrides.apply(&mut settings);

    match cli.command {
        Commands::Extract {
            input,
            output_dir,
            stdout,
        } => extract(&settings, &input, &output_dir, stdout).await,
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| settings.bind_addr.clone());
            server::serve(&settings, &addr).await
        }
        Commands::InitConfig { force } => init_config(&settings, &config_path, force),
    }
}

async fn extract(settings: &Settings, input: &Path, output_dir: &Path, stdout: bool) -> Result<()> {
    // Input problems are fatal before any request goes out.
    let queries = read_queries_from_path(input)
        .with_context(|| format!("failed to read queries from {}", input.display()))?;
    let harvester = settings
        .harvester()
        .context("failed to build HTTP client")?;
    let builder = settings
        .url_builder()
        .context("invalid base_url setting")?;

    let started = Utc::now();
    vin_info!(
        "Extracting up to {} VINs for each of {} rows",
        settings.max_vins,
        queries.len()
    );
    let result = run_queries(&harvester, &builder, &queries, &LogSink).await;
    let elapsed = Utc::now().signed_duration_since(started);

    if stdout {
        let mut out = io::stdout().lock();
        write_csv(&result, &mut out).context("failed to write CSV to stdout")?;
        out.flush()?;
    } else {
        let summary = export_to_dir(&result, output_dir)
            .with_context(|| format!("failed to write {EXPORT_FILENAME}"))?;
        println!(
            "Wrote {} rows to {}",
            summary.row_count,
            summary.output_path.display()
        );
    }
    vin_info!(
        "Finished {} rows in {}s",
        queries.len(),
        elapsed.num_seconds()
    );
    Ok(())
}

fn init_config(settings: &Settings, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    let written = save_settings(path, settings)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote settings to {}", written.display());
    Ok(())
}
