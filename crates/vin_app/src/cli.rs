use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "vin_harvester")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract VINs from TrueCar new-car listings for a CSV of Ford models and trims", long_about = None)]
pub struct Cli {
    /// Settings file (RON); missing file means defaults
    #[arg(short, long, global = true, env = "VIN_HARVESTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write the log to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract VINs for every Model/Trim row of a CSV file
    Extract {
        /// Input CSV with `Model` and `Trim` columns
        input: PathBuf,

        /// Directory that receives extracted_vins.csv
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Print the CSV to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Serve the browser UI
    Serve {
        /// Address to listen on (default from settings)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Write the effective settings to the settings file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Command line values that take precedence over the settings file.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Listing base URL, e.g. https://www.truecar.com/new-cars-for-sale/listings/ford
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Maximum VINs kept per model/trim
    #[arg(long, global = true)]
    pub max_vins: Option<usize>,

    /// Maximum result pages fetched per model/trim
    #[arg(long, global = true)]
    pub max_pages: Option<u32>,

    /// Attempts per page before it is abandoned
    #[arg(long, global = true)]
    pub retry_attempts: Option<u32>,

    /// Delay between attempts, in milliseconds
    #[arg(long, global = true)]
    pub retry_delay_ms: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, global = true)]
    pub user_agent: Option<String>,
}

impl Overrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(max_vins) = self.max_vins {
            settings.max_vins = max_vins;
        }
        if let Some(max_pages) = self.max_pages {
            settings.max_pages = max_pages;
        }
        if let Some(attempts) = self.retry_attempts {
            settings.retry_attempts = attempts;
        }
        if let Some(delay) = self.retry_delay_ms {
            settings.retry_delay_ms = delay;
        }
        if let Some(timeout) = self.timeout_secs {
            settings.request_timeout_secs = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            settings.user_agent = user_agent.clone();
        }
    }
}
