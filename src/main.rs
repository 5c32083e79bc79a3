//! promptcache binary.

mod cli;

use anyhow::Result;
use clap::Parser;

use promptcache::config::Config;

use cli::{cmd_run, init_logging, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    init_logging(config.logging.format);

    cmd_run(config).await
}
