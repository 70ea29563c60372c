mod auth;
mod cleanup;
mod cli;
mod client;
mod config;
mod dispatch;
mod error;
mod remove;
mod retry;
mod template;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting jobkeeper");
    cli.execute().await?;

    Ok(())
}
