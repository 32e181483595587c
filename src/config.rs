//! Server configuration.
//!
//! Settings merge from three layers, highest priority first: command-line
//! flags (with environment-variable fallbacks), an optional YAML config
//! file, and built-in defaults.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::logging::LogFormat;

const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);

/// Fallback signing secret for local development. `run_server` warns
/// loudly when it is still in effect.
pub const DEV_JWT_SECRET: &str = "petcare-dev-secret";

#[derive(Debug, Parser)]
#[command(name = "petcare-api", about = "Multi-tenant pet care management API")]
pub struct CliArgs {
    /// Path to a YAML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Socket address to bind the HTTP listener to.
    #[arg(long, env = "BIND_ADDRESS")]
    pub bind: Option<SocketAddr>,

    /// Secret used to sign session tokens.
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    bind: Option<SocketAddr>,
    jwt_secret: Option<String>,
    log_format: Option<LogFormat>,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub jwt_secret: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            bind: cli_bind,
            jwt_secret: cli_jwt_secret,
            log_format: cli_log_format,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        Ok(ServerConfig {
            bind_address: cli_bind
                .or(file_config.bind)
                .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND)),
            jwt_secret: cli_jwt_secret
                .or(file_config.jwt_secret)
                .unwrap_or_else(|| DEV_JWT_SECRET.to_string()),
            log_format: cli_log_format
                .or(file_config.log_format)
                .unwrap_or_default(),
        })
    }

    /// Whether the configuration still carries the development secret.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
