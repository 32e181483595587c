use anyhow::Result;
use clap::Parser;

use petcare_api::{CliArgs, ServerConfig, init_logging, run_server};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = ServerConfig::from_args(args)?;
    init_logging(config.log_format)?;
    run_server(config).await
}
