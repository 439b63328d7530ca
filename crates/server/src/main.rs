mod api;
mod cli;
mod daemon;
mod services;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use daemon::server::run_server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run_server(cli.into_config()).await
}
