mod cli;
mod config;
mod excel;
mod matrix;
mod server;

use anyhow::Result;
use clap::Parser;
use log::info;

use crate::cli::Cli;
use crate::config::ServerConfig;
use crate::matrix::MatrixStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ServerConfig::load(&cli)?;
    init_logging(&config)?;

    info!(
        "Starting changeover-server {} (export path: {})",
        env!("CARGO_PKG_VERSION"),
        config.export_path.display()
    );

    let store = MatrixStore::seeded();
    server::serve(&config, store).await
}

fn init_logging(config: &ServerConfig) -> Result<()> {
    let level = config.log_filter()?;
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    Ok(())
}
