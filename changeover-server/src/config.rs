//! Server configuration
//!
//! Built from defaults, then an optional TOML file, then environment
//! variables and command-line flags (highest priority).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;

/// Runtime configuration for the HTTP server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Fixed location the export is written to (last writer wins)
    pub export_path: PathBuf,
    pub max_upload_bytes: usize,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            export_path: PathBuf::from("matrix_data.xlsx"),
            max_upload_bytes: 10 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolve the final config for a parsed command line
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(path) = &cli.export_path {
            self.export_path = path.clone();
        }
        if let Some(max) = cli.max_upload_bytes {
            self.max_upload_bytes = max;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    fn validate(&self) -> Result<()> {
        self.log_filter()?;
        if self.max_upload_bytes == 0 {
            anyhow::bail!("max_upload_bytes must be greater than zero");
        }
        Ok(())
    }

    pub fn log_filter(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("Unknown log level: {}", self.log_level))
    }

    /// `host:port` for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
