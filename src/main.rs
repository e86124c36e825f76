//! Trackcut CLI
//!
//! A command-line timeline editor: upload video and audio files, cut and
//! remove segments on a shared timeline, and export the result.
//!
//! # Usage
//!
//! ```bash
//! trackcut edit --script session.toml --export --output out/
//! trackcut probe --input clip.mp4
//! trackcut merge --video a.mp4 --segments '[{"fileIndex":0,"start":0,"end":5}]'
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use trackcut::cli::{commands, Cli};
use trackcut::config_initialization::initialize_configuration_hierarchy;
use trackcut::utils::logging::init_logging;

/// Main entry point for the Trackcut CLI application
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli)?;
    init_logging(config.level()?, config.format()?);

    info!("Starting Trackcut");

    if let Err(e) = commands::run(cli.command, &config).await {
        error!("{:#}", e);
        return Err(e);
    }

    info!("Trackcut completed successfully");
    Ok(())
}
