use clap::Parser;
use vin_app::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    vin_app::init_logging(&cli);
    vin_app::run(cli).await
}
