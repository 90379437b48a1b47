use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use spendlog::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    cli.run().await
}
