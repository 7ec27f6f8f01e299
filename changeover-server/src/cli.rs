//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

/// Serve the changeover time matrix over HTTP
#[derive(Debug, Default, Parser)]
#[command(name = "changeover-server", version, about)]
pub struct Cli {
    /// TOML config file
    #[arg(short, long, env = "CHANGEOVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "CHANGEOVER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CHANGEOVER_PORT")]
    pub port: Option<u16>,

    /// Where GET /download writes the workbook before sending it
    #[arg(long, env = "CHANGEOVER_EXPORT_PATH")]
    pub export_path: Option<PathBuf>,

    /// Maximum accepted upload size in bytes
    #[arg(long, env = "CHANGEOVER_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: Option<usize>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG wins if set
    #[arg(long, env = "CHANGEOVER_LOG_LEVEL")]
    pub log_level: Option<String>,
}
